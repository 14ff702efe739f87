use async_trait::async_trait;

use drawsense_domain::{StatusReport, TaskId};

use crate::error::ApiError;
use crate::payload::ImagePayload;

/// Stateless request surface of the analysis backend.
///
/// One call, one request: retry and polling policy live with the caller.
/// Implementations must be shareable across tasks (`Send + Sync`).
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Upload an image for analysis. Returns the server-issued id of the
    /// queued job.
    async fn submit(&self, image: &ImagePayload) -> Result<TaskId, ApiError>;

    /// Fetch the current status of a previously submitted job.
    async fn status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError>;
}
