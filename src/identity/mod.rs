pub mod did;
pub mod did_ethr;
pub mod did_pkh;
pub mod resolver;
pub mod session;
