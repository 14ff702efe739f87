use std::time::Duration;

/// Configuration for the submission poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed wait between consecutive status checks.
    pub poll_interval: Duration,
    /// Upper bound on how long a job may stay non-terminal before the run
    /// fails with a timeout outcome. `None` polls until the backend
    /// answers; production deployments should set a bound.
    pub max_poll_duration: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_poll_duration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_second_unbounded_polling() {
        let config = PollerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert!(config.max_poll_duration.is_none());
    }
}
