#[derive(thiserror::Error, Debug)]
#[error("conversion error")]
pub struct ConversionError;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0}")]
pub struct InvalidContextError(pub &'static str);
