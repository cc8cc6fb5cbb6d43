pub mod claims;
pub mod errors;
pub mod ethereum;
pub mod identity;
pub mod json_signatures;
pub mod logger;
