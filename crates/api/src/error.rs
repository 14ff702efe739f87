use thiserror::Error;

/// Errors from the job API layer.
///
/// Backends that cannot tell an unknown id apart from any other failed
/// request surface it as `Server` rather than `NotFound`.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("unknown task id: {0}")]
    NotFound(String),

    #[error("protocol violation: {0}")]
    Protocol(String),
}
