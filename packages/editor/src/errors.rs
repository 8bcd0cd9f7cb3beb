//! Error types for the editor

use formstudio_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StudioError {
    #[error("Command already started")]
    AlreadyStarted,

    #[error("Command is not staged")]
    NotStaged,

    #[error("Page index out of range: {0}")]
    PageOutOfRange(usize),

    #[error("Item index out of range: {index} on page {page}")]
    ItemOutOfRange { page: usize, index: usize },

    #[error("Page set index out of range: {0}")]
    PageSetOutOfRange(usize),

    #[error("Workflow index out of range: {0}")]
    WorkflowOutOfRange(usize),

    #[error("Interview index out of range: {0}")]
    InterviewOutOfRange(usize),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Name already in use: {0}")]
    DuplicateName(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
