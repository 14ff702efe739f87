use thiserror::Error;

use drawsense_domain::DomainError;

/// Errors surfaced to the caller of the poller itself.
///
/// Backend failures never appear here; they resolve into a terminal
/// [`RunOutcome`](drawsense_domain::RunOutcome) on the observable state.
#[derive(Debug, Error)]
pub enum PollerError {
    /// A run is already submitting or polling against this state.
    #[error("a workflow run is already active")]
    RunActive,

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}
