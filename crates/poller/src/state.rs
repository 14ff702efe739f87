use tokio::sync::watch;

use drawsense_domain::RunOutcome;

/// One observed value of the workflow state.
///
/// Published as a whole: a terminal write sets `result` and clears
/// `loading` in the same snapshot, so observers never see the two fields
/// disagree about whether a run is still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub loading: bool,
    pub result: Option<RunOutcome>,
}

impl StateSnapshot {
    pub fn idle() -> Self {
        Self {
            loading: false,
            result: None,
        }
    }

    pub(crate) fn in_progress() -> Self {
        Self {
            loading: true,
            result: None,
        }
    }

    pub(crate) fn settled(outcome: RunOutcome) -> Self {
        Self {
            loading: false,
            result: Some(outcome),
        }
    }

    /// User-facing text of the terminal result, if one exists.
    pub fn display_text(&self) -> Option<String> {
        self.result.as_ref().map(RunOutcome::display_text)
    }
}

/// Observable `{loading, result}` holder.
///
/// Only the poll loop writes; observers subscribe or read the current
/// snapshot. Backed by a watch channel, so every publish synchronously
/// replaces the value and wakes subscribers.
pub struct WorkflowState {
    tx: watch::Sender<StateSnapshot>,
}

impl WorkflowState {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(StateSnapshot::idle());
        Self { tx }
    }

    /// Subscribe to state changes. The receiver starts at the current
    /// snapshot and sees every subsequent publish.
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.tx.subscribe()
    }

    /// Read the current snapshot.
    pub fn snapshot(&self) -> StateSnapshot {
        self.tx.borrow().clone()
    }

    pub(crate) fn publish(&self, snapshot: StateSnapshot) {
        self.tx.send_replace(snapshot);
    }
}
