use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use drawsense_api::{ApiError, ImagePayload, JobApi};
use drawsense_domain::{FailureKind, JobStatus, RunOutcome, RunPhase};

use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::state::{StateSnapshot, WorkflowState};

/// Drives one image submission through the analysis backend.
///
/// `submit_and_track` spawns a run task that submits the image, polls the
/// job status at the configured interval, and publishes the terminal
/// outcome on the observable state. At most one run is active at a time.
pub struct SubmissionPoller {
    api: Arc<dyn JobApi>,
    config: PollerConfig,
    shared: Arc<Shared>,
}

/// Caller-held handle to one spawned run.
///
/// The owning session must cancel it on teardown; cancellation stops the
/// loop before its next wait or request, and nothing is written to the
/// observable state afterwards.
pub struct RunHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RunHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run task to exit, terminal or cancelled.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// State shared between the poller and its spawned run tasks.
struct Shared {
    state: WorkflowState,
    slot: Mutex<RunSlot>,
}

/// The run currently occupying this poller. One lock guards the phase, the
/// run generation, and every snapshot publish, so a phase change and its
/// published snapshot are observed together.
struct RunSlot {
    phase: RunPhase,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl Shared {
    fn lock_slot(&self) -> MutexGuard<'_, RunSlot> {
        self.slot.lock().expect("run slot lock poisoned")
    }

    /// Advance the phase of run `generation`. Returns false when the run
    /// has been superseded; the run task must then stop without publishing.
    fn advance(&self, generation: u64, next: RunPhase) -> bool {
        let mut slot = self.lock_slot();
        if slot.generation != generation {
            return false;
        }
        match slot.phase.transition_to(next) {
            Ok(phase) => {
                slot.phase = phase;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "refused run phase transition");
                false
            }
        }
    }

    /// Publish the terminal outcome of run `generation`, unless the run was
    /// superseded by a reset or a newer submission.
    fn finish(&self, generation: u64, outcome: RunOutcome) {
        let mut slot = self.lock_slot();
        if slot.generation != generation {
            return;
        }
        let next = if outcome.is_failure() {
            RunPhase::Failed
        } else {
            RunPhase::Done
        };
        match slot.phase.transition_to(next) {
            Ok(phase) => slot.phase = phase,
            Err(e) => {
                tracing::error!(error = %e, "refused terminal transition");
                return;
            }
        }
        slot.cancel = None;
        self.state.publish(StateSnapshot::settled(outcome));
    }
}

impl SubmissionPoller {
    pub fn new(api: Arc<dyn JobApi>, config: PollerConfig) -> Self {
        Self {
            api,
            config,
            shared: Arc::new(Shared {
                state: WorkflowState::new(),
                slot: Mutex::new(RunSlot {
                    phase: RunPhase::Idle,
                    generation: 0,
                    cancel: None,
                }),
            }),
        }
    }

    /// The observable `{loading, result}` state. Read-only for callers.
    pub fn state(&self) -> &WorkflowState {
        &self.shared.state
    }

    pub fn phase(&self) -> RunPhase {
        self.shared.lock_slot().phase
    }

    /// Submit `image` and track the job to a terminal outcome.
    ///
    /// Publishes `{loading: true, result: None}` before returning, spawns
    /// the run task, and hands back its [`RunHandle`]. Rejected with
    /// [`PollerError::RunActive`] while a previous run is still submitting
    /// or polling; a settled run is implicitly reset.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_and_track(&self, image: ImagePayload) -> Result<RunHandle, PollerError> {
        let (generation, cancel) = {
            let mut slot = self.shared.lock_slot();
            if slot.phase.is_active() {
                return Err(PollerError::RunActive);
            }
            slot.phase = slot.phase.reset()?.transition_to(RunPhase::Submitting)?;
            slot.generation += 1;
            let cancel = CancellationToken::new();
            slot.cancel = Some(cancel.clone());
            self.shared.state.publish(StateSnapshot::in_progress());
            (slot.generation, cancel)
        };

        let task = tokio::spawn(run(
            Arc::clone(&self.api),
            Arc::clone(&self.shared),
            self.config.clone(),
            image,
            generation,
            cancel.clone(),
        ));

        Ok(RunHandle { cancel, task })
    }

    /// Abandon any active run and return the observable state to empty.
    ///
    /// Unconditional and idempotent: valid after a terminal outcome, with
    /// no run at all, or mid-poll (the active run is cancelled first).
    pub fn reset(&self) {
        let mut slot = self.shared.lock_slot();
        if let Some(cancel) = slot.cancel.take() {
            cancel.cancel();
        }
        // Superseding the generation closes the door on a response that is
        // already in flight for the cancelled run.
        slot.generation += 1;
        slot.phase = RunPhase::Idle;
        self.shared.state.publish(StateSnapshot::idle());
    }
}

/// One run: submit, then poll to a terminal status.
async fn run(
    api: Arc<dyn JobApi>,
    shared: Arc<Shared>,
    config: PollerConfig,
    image: ImagePayload,
    generation: u64,
    cancel: CancellationToken,
) {
    let submitted = tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        result = api.submit(&image) => result,
    };

    let task_id = match submitted {
        Ok(task_id) => task_id,
        Err(e) => {
            tracing::warn!(error = %e, "image submission failed");
            shared.finish(
                generation,
                RunOutcome::failed(FailureKind::Submit, e.to_string()),
            );
            return;
        }
    };

    tracing::info!(task_id = %task_id, "analysis job queued");
    if !shared.advance(generation, RunPhase::Polling) {
        return;
    }

    let started = tokio::time::Instant::now();
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(config.poll_interval) => {}
        }

        // The budget is checked at poll boundaries, so the run ends at the
        // first tick past the configured bound.
        if let Some(max) = config.max_poll_duration
            && started.elapsed() >= max
        {
            tracing::warn!(task_id = %task_id, "polling budget exhausted");
            shared.finish(
                generation,
                RunOutcome::failed(
                    FailureKind::Timeout,
                    format!("no result after {}s", max.as_secs()),
                ),
            );
            return;
        }

        let report = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            result = api.status(&task_id) => match result {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(task_id = %task_id, error = %e, "status poll failed");
                    shared.finish(
                        generation,
                        RunOutcome::failed(poll_failure_kind(&e), e.to_string()),
                    );
                    return;
                }
            },
        };

        match report.status {
            JobStatus::Done => {
                let outcome = match report.result {
                    Some(text) => RunOutcome::Interpretation(text),
                    // done without a body is a broken contract, not a success
                    None => RunOutcome::failed(
                        FailureKind::Protocol,
                        "analysis finished without a result",
                    ),
                };
                tracing::info!(task_id = %task_id, "analysis complete");
                shared.finish(generation, outcome);
                return;
            }
            JobStatus::Error => {
                let detail = report
                    .result
                    .unwrap_or_else(|| "unspecified analysis failure".to_string());
                tracing::warn!(task_id = %task_id, "analysis job failed");
                shared.finish(
                    generation,
                    RunOutcome::failed(FailureKind::JobFailed, detail),
                );
                return;
            }
            JobStatus::Pending | JobStatus::Unknown => {
                tracing::debug!(task_id = %task_id, status = %report.status, "analysis still pending");
            }
        }
    }
}

fn poll_failure_kind(error: &ApiError) -> FailureKind {
    match error {
        ApiError::Network(_) => FailureKind::Transport,
        // Backends without a distinct not-found answer report it as a
        // server error; terminalize both the same way.
        ApiError::Server { .. } | ApiError::NotFound(_) => FailureKind::Server,
        ApiError::Protocol(_) => FailureKind::Protocol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_in(phase: RunPhase, generation: u64) -> Shared {
        Shared {
            state: WorkflowState::new(),
            slot: Mutex::new(RunSlot {
                phase,
                generation,
                cancel: None,
            }),
        }
    }

    #[test]
    fn finish_refuses_stale_generation() {
        let shared = shared_in(RunPhase::Polling, 2);

        shared.finish(1, RunOutcome::Interpretation("late".to_string()));
        assert_eq!(shared.state.snapshot(), StateSnapshot::idle());
        assert_eq!(shared.lock_slot().phase, RunPhase::Polling);

        shared.finish(2, RunOutcome::Interpretation("current".to_string()));
        let snapshot = shared.state.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(
            snapshot.result,
            Some(RunOutcome::Interpretation("current".to_string()))
        );
        assert_eq!(shared.lock_slot().phase, RunPhase::Done);
    }

    #[test]
    fn advance_refuses_stale_generation_and_invalid_transition() {
        let shared = shared_in(RunPhase::Submitting, 2);
        assert!(!shared.advance(1, RunPhase::Polling));
        assert_eq!(shared.lock_slot().phase, RunPhase::Submitting);

        assert!(shared.advance(2, RunPhase::Polling));
        assert_eq!(shared.lock_slot().phase, RunPhase::Polling);

        // Polling -> Submitting is not a legal move.
        assert!(!shared.advance(2, RunPhase::Submitting));
    }

    #[test]
    fn failure_kind_mapping() {
        assert_eq!(
            poll_failure_kind(&ApiError::Network("reset".to_string())),
            FailureKind::Transport
        );
        assert_eq!(
            poll_failure_kind(&ApiError::Server {
                status: 500,
                body: "boom".to_string()
            }),
            FailureKind::Server
        );
        assert_eq!(
            poll_failure_kind(&ApiError::NotFound("abc123".to_string())),
            FailureKind::Server
        );
        assert_eq!(
            poll_failure_kind(&ApiError::Protocol("bad body".to_string())),
            FailureKind::Protocol
        );
    }
}
