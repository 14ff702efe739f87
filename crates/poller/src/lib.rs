//! Submission poller for the DrawSense analysis workflow.
//!
//! Bridges a one-shot image capture to the asynchronous analysis job behind
//! it: submit the image, poll the job at a fixed interval until a terminal
//! status, and publish `{loading, result}` snapshots that the UI observes.

mod config;
mod error;
mod poller;
mod state;

pub use config::PollerConfig;
pub use error::PollerError;
pub use poller::{RunHandle, SubmissionPoller};
pub use state::{StateSnapshot, WorkflowState};
