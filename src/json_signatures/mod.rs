pub mod create;
pub mod proofs;
pub mod verify;
