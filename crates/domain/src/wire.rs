// -- Wire schemas --
// Bodies exchanged with the analysis backend over HTTP. Field names are
// fixed by the server contract.

use crate::status::JobStatus;

/// Response body of `POST /submit`: the id of the queued analysis job.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SubmitReceipt {
    pub task_id: String,
}

/// Response body of `GET /result/{task_id}`.
///
/// `result` carries the interpretation text when `status` is `done` and the
/// failure detail when `status` is `error`; it is null otherwise.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StatusReport {
    pub status: JobStatus,
    pub result: Option<String>,
}

impl StatusReport {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            result: None,
        }
    }

    pub fn done(result: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Done,
            result: Some(result.into()),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Error,
            result: Some(detail.into()),
        }
    }
}
