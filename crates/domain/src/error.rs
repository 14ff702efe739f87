/// Errors for domain schema validation.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),

    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
