use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    #[error("object is not a mutable adapter")]
    NotMutable,

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),
}
