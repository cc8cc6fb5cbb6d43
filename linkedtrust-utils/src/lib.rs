pub mod caip2;
pub mod canonicalization;
pub mod datetime;
pub mod files;
