use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Page has no code")]
    MissingPageCode,

    #[error("Duplicate page code: {0}")]
    DuplicatePage(String),

    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("Duplicate page set type: {0}")]
    DuplicatePageSet(String),

    #[error("Duplicate workflow: {0}")]
    DuplicateWorkflow(String),

    #[error("Page set {page_set} references unknown page {page}")]
    UnknownPage { page_set: String, page: String },

    #[error("Workflow {workflow} references unknown page set {page_set}")]
    UnknownPageSet { workflow: String, page_set: String },

    #[error("Rule targets unknown variable: {0}")]
    UnknownRuleTarget(String),
}
