pub mod canonicalization;
pub mod raw;
pub mod submission;
pub mod types;
