/// Machine-readable category for a failed workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The initial upload never produced a task id.
    Submit,
    /// Connectivity or timeout while talking to the backend.
    Transport,
    /// The backend answered with a non-success status.
    Server,
    /// The backend answered, but not with the expected shape.
    Protocol,
    /// The analysis job itself reported failure.
    JobFailed,
    /// The configured polling budget ran out before a terminal status.
    Timeout,
}

/// Terminal result of one workflow run.
///
/// Carries the structured outcome; [`display_text`](Self::display_text)
/// renders the user-facing string the UI shows. Job-reported failures are
/// prefixed `Gagal:`, everything else `Terjadi kesalahan:`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RunOutcome {
    Interpretation(String),
    Failed { kind: FailureKind, message: String },
}

impl RunOutcome {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Interpretation(_) => None,
            Self::Failed { kind, .. } => Some(*kind),
        }
    }

    /// User-facing text for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            Self::Interpretation(text) => text.clone(),
            Self::Failed {
                kind: FailureKind::JobFailed,
                message,
            } => format!("Gagal: {message}"),
            Self::Failed { message, .. } => format!("Terjadi kesalahan: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretation_displays_verbatim() {
        let outcome = RunOutcome::Interpretation("Friendly".to_string());
        assert_eq!(outcome.display_text(), "Friendly");
        assert!(!outcome.is_failure());
        assert_eq!(outcome.failure_kind(), None);
    }

    #[test]
    fn job_failure_uses_gagal_prefix() {
        let outcome = RunOutcome::failed(FailureKind::JobFailed, "bad image");
        assert_eq!(outcome.display_text(), "Gagal: bad image");
        assert_eq!(outcome.failure_kind(), Some(FailureKind::JobFailed));
    }

    #[test]
    fn other_failures_use_kesalahan_prefix() {
        for kind in [
            FailureKind::Submit,
            FailureKind::Transport,
            FailureKind::Server,
            FailureKind::Protocol,
            FailureKind::Timeout,
        ] {
            let outcome = RunOutcome::failed(kind, "connection refused");
            assert_eq!(outcome.display_text(), "Terjadi kesalahan: connection refused");
            assert!(outcome.is_failure());
        }
    }

    #[test]
    fn serde_round_trip() {
        let outcome = RunOutcome::failed(FailureKind::Timeout, "no result after 300s");
        let json = serde_json::to_string(&outcome).unwrap();
        let back: RunOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
