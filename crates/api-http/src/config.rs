use std::time::Duration;

/// Configuration for the HTTP job API backend.
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL of the analysis service (e.g. `https://api.example.com`).
    /// A trailing slash is tolerated.
    pub base_url: String,
    /// Per-request timeout covering connect, send, and body read.
    pub request_timeout: Duration,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout() {
        let config = HttpApiConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
