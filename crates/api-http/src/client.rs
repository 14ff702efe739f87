//! REST client for the analysis service HTTP endpoints.
//!
//! Wraps the two-call surface (multipart image submission, status lookup)
//! using [`reqwest`]. No retries here: polling policy belongs to the
//! workflow layer.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use drawsense_api::{ApiError, ImagePayload, JobApi};
use drawsense_domain::{StatusReport, SubmitReceipt, TaskId};

use crate::config::HttpApiConfig;

/// HTTP client for a single analysis service instance.
pub struct HttpJobApi {
    client: reqwest::Client,
    config: HttpApiConfig,
}

impl HttpJobApi {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: HttpApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// pooling connections across several backends).
    pub fn with_client(client: reqwest::Client, config: HttpApiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn submit(&self, image: &ImagePayload) -> Result<TaskId, ApiError> {
        if !image.is_image() {
            return Err(ApiError::Protocol(format!(
                "refusing to upload non-image MIME type {:?}",
                image.mime_type
            )));
        }

        // The body shares the payload's buffer; no copy of the image bytes.
        let part = Part::stream(reqwest::Body::from(image.bytes.clone()))
            .file_name(image.filename.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::Protocol(format!("invalid MIME type: {e}")))?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            filename = %image.filename,
            bytes = image.bytes.len(),
            "uploading image for analysis",
        );

        let response = self
            .client
            .post(self.endpoint("submit"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let receipt: SubmitReceipt = parse_json(&read_success_body(response).await?)?;
        TaskId::new(&receipt.task_id).map_err(|e| ApiError::Protocol(e.to_string()))
    }

    async fn status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("result/{task_id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(task_id.to_string()));
        }

        parse_json(&read_success_body(response).await?)
    }
}

/// Read the response body, returning it as `Server` error context when the
/// status is not a success.
async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Parse a successful JSON body into the expected type.
fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Protocol(format!("unexpected response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpJobApi {
        HttpJobApi::with_client(
            reqwest::Client::new(),
            HttpApiConfig {
                base_url: base_url.to_string(),
                ..HttpApiConfig::default()
            },
        )
    }

    #[test]
    fn endpoint_joins_paths() {
        let api = api("http://localhost:8000");
        assert_eq!(api.endpoint("submit"), "http://localhost:8000/submit");
        assert_eq!(
            api.endpoint("result/abc123"),
            "http://localhost:8000/result/abc123"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let api = api("http://localhost:8000/");
        assert_eq!(api.endpoint("submit"), "http://localhost:8000/submit");
    }

    #[test]
    fn parse_json_maps_decode_failure_to_protocol() {
        let result: Result<SubmitReceipt, _> = parse_json("not json");
        assert!(matches!(result, Err(ApiError::Protocol(_))));

        // Valid JSON but missing the identifier field is also a protocol
        // violation, not a server error.
        let result: Result<SubmitReceipt, _> = parse_json("{}");
        assert!(matches!(result, Err(ApiError::Protocol(_))));
    }

    #[test]
    fn parse_json_accepts_contract_bodies() {
        let receipt: SubmitReceipt = parse_json(r#"{"task_id":"abc123"}"#).unwrap();
        assert_eq!(receipt.task_id, "abc123");

        let report: StatusReport = parse_json(r#"{"status":"pending","result":null}"#).unwrap();
        assert!(report.result.is_none());
    }
}
