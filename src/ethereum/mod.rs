pub mod signatures;
pub mod utils;
pub mod wallet;
