use crate::error::DomainError;

/// Workflow run state machine.
///
/// One run moves `Idle -> Submitting -> Polling -> {Done, Failed}`. A reset
/// returns a settled run to `Idle`; an active run must be cancelled before
/// it can be reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Submitting,
    Polling,
    Done,
    Failed,
}

impl RunPhase {
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Submitting)
                | (Self::Submitting, Self::Polling)
                | (Self::Submitting, Self::Failed)
                | (Self::Polling, Self::Done)
                | (Self::Polling, Self::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// A run is active between submission start and its terminal phase.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Submitting | Self::Polling)
    }

    pub fn transition_to(self, next: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: format!("{self:?}"),
                to: format!("{next:?}"),
            })
        }
    }

    /// Return to `Idle`, enabling a new run. Valid from `Idle` (no-op),
    /// `Done`, and `Failed`; rejected while a run is active.
    pub fn reset(self) -> Result<Self, DomainError> {
        if self.is_active() {
            return Err(DomainError::InvalidTransition {
                from: format!("{self:?}"),
                to: "Idle".to_string(),
            });
        }
        Ok(Self::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling => "polling",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
