use crate::error::DomainError;

/// Opaque server-issued identifier for one submitted analysis job.
///
/// The backend mints these; the client never parses them. Validation only
/// rejects values that cannot round-trip through a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty()
            || raw.len() > 128
            || raw.chars().any(|c| c.is_whitespace() || c.is_control())
            || raw.contains('/')
        {
            return Err(DomainError::InvalidTaskId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = DomainError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> String {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_task_id() {
        assert!(TaskId::new("abc123").is_ok());
        assert!(TaskId::new("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(TaskId::new("task_42").is_ok());
    }

    #[test]
    fn invalid_task_id() {
        assert!(TaskId::new("").is_err());
        assert!(TaskId::new("has space").is_err());
        assert!(TaskId::new("has/slash").is_err());
        assert!(TaskId::new("tab\tchar").is_err());
        assert!(TaskId::new(&"a".repeat(129)).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = TaskId::new("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<TaskId, _> = serde_json::from_str("\"not a task id\"");
        assert!(result.is_err());
    }
}
