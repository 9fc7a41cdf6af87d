//! Gemini HTTP client
//!
//! Real implementation of the remote generation capability against the
//! generateContent REST endpoint. Retry policy stays with the caller; the
//! client maps transport and HTTP-level failures to typed errors and nothing
//! more.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::error::{Error, Result};

use super::api::GenerateContentApi;
use super::types::{GenerateContentRequest, GenerateContentResponse, Modality, Part};

/// Gemini API base URL
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default image-capable model
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

/// HTTP client for the generateContent endpoint
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Builder for GeminiClient
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for GeminiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (defaults to the Gemini endpoint)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the GeminiClient
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self.api_key.ok_or(Error::ApiKeyMissing)?;

        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(120));

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Network)?;

        Ok(GeminiClient {
            http_client,
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}

impl GeminiClient {
    /// Create a new client with the given API key and default model
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        GeminiClientBuilder::new().api_key(api_key).build()
    }

    /// Create a new builder
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// The model this client targets
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Handle error responses from the API
    async fn handle_error_response<T>(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> Result<T> {
        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            400 => Err(Error::Api(format!("Bad request: {}", body))),
            401 | 403 => Err(Error::ApiKeyMissing),
            404 => Err(Error::Api(format!("Model not found: {}", body))),
            429 => Err(Error::RateLimited(extract_retry_after(&body).unwrap_or(60))),
            500..=599 => Err(Error::Api(format!("Server error ({}): {}", status, body))),
            _ => Err(Error::Api(format!("HTTP error {}: {}", status, body))),
        }
    }
}

#[async_trait]
impl GenerateContentApi for GeminiClient {
    async fn generate(
        &self,
        parts: Vec<Part>,
        modalities: &[Modality],
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest::new(parts, modalities);

        debug!(model = %self.model, "Sending generateContent request");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();

        if !status.is_success() {
            return self.handle_error_response(status, response).await;
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse response: {}", e)))
    }
}

/// Extract retry-after value from an error response body
fn extract_retry_after(body: &str) -> Option<u64> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(retry_after) = json.get("retry_after").and_then(|v| v.as_u64()) {
            return Some(retry_after);
        }
        if let Some(error) = json.get("error")
            && let Some(retry_after) = error.get("retry_after").and_then(|v| v.as_u64())
        {
            return Some(retry_after);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = GeminiClientBuilder::new().build();
        assert!(matches!(result, Err(Error::ApiKeyMissing)));
    }

    #[test]
    fn test_builder_defaults() {
        let client = GeminiClient::new("test-key").unwrap();
        assert_eq!(client.base_url, GEMINI_BASE_URL);
        assert_eq!(client.model(), DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_builder_overrides() {
        let client = GeminiClient::builder()
            .api_key("test-key")
            .base_url("http://localhost:8080")
            .model("test-model")
            .timeout_secs(5)
            .build()
            .unwrap();

        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.model(), "test-model");
    }

    #[test]
    fn test_debug_omits_api_key() {
        let client = GeminiClient::new("secret-key").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("GeminiClient"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_client_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeminiClient>();
    }

    #[test]
    fn test_extract_retry_after() {
        assert_eq!(extract_retry_after(r#"{"retry_after": 30}"#), Some(30));
        assert_eq!(
            extract_retry_after(r#"{"error": {"retry_after": 60}}"#),
            Some(60)
        );
        assert_eq!(extract_retry_after(r#"{"message": "rate limited"}"#), None);
    }
}
