//! Scripted in-memory [`JobApi`] backend.
//!
//! Tests enqueue the responses each call should produce; exhausted scripts
//! fall back to a fresh task id on submit and `pending` on status, so an
//! open-ended poll loop can run against it indefinitely.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use async_trait::async_trait;
use drawsense_api::{ApiError, ImagePayload, JobApi};
use drawsense_domain::{StatusReport, TaskId};

const FALLBACK_TASK_ID: &str = "task-mem";

pub struct MemoryJobApi {
    inner: Mutex<Inner>,
    submit_calls: AtomicU32,
    status_calls: AtomicU32,
}

#[derive(Default)]
struct Inner {
    submit_script: VecDeque<Result<TaskId, ApiError>>,
    status_script: VecDeque<Result<StatusReport, ApiError>>,
    submitted: Vec<ImagePayload>,
    response_delay: Option<Duration>,
}

impl MemoryJobApi {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            submit_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
        }
    }

    /// Enqueue the result of the next `submit` call.
    pub async fn script_submit(&self, result: Result<TaskId, ApiError>) {
        self.inner.lock().await.submit_script.push_back(result);
    }

    /// Enqueue the result of the next `status` call.
    pub async fn script_status(&self, result: Result<StatusReport, ApiError>) {
        self.inner.lock().await.status_script.push_back(result);
    }

    /// Enqueue a sequence of successful status reports, oldest first.
    pub async fn script_statuses(&self, reports: impl IntoIterator<Item = StatusReport>) {
        let mut inner = self.inner.lock().await;
        for report in reports {
            inner.status_script.push_back(Ok(report));
        }
    }

    /// Delay every subsequent call by `delay` before it responds, simulating
    /// an in-flight network request.
    pub async fn set_response_delay(&self, delay: Duration) {
        self.inner.lock().await.response_delay = Some(delay);
    }

    /// Number of `submit` calls initiated so far.
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::Acquire)
    }

    /// Number of `status` calls initiated so far.
    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::Acquire)
    }

    /// Payloads received by `submit`, in call order.
    pub async fn submitted(&self) -> Vec<ImagePayload> {
        self.inner.lock().await.submitted.clone()
    }

    async fn apply_delay(&self) {
        let delay = self.inner.lock().await.response_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MemoryJobApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobApi for MemoryJobApi {
    async fn submit(&self, image: &ImagePayload) -> Result<TaskId, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::AcqRel);
        self.apply_delay().await;

        let mut inner = self.inner.lock().await;
        inner.submitted.push(image.clone());
        inner.submit_script.pop_front().unwrap_or_else(|| {
            Ok(TaskId::new(FALLBACK_TASK_ID).expect("fallback task id is valid"))
        })
    }

    async fn status(&self, _task_id: &TaskId) -> Result<StatusReport, ApiError> {
        self.status_calls.fetch_add(1, Ordering::AcqRel);
        self.apply_delay().await;

        let mut inner = self.inner.lock().await;
        inner
            .status_script
            .pop_front()
            .unwrap_or_else(|| Ok(StatusReport::pending()))
    }
}
