//! GeminiClient -- concrete [`CompletionGateway`] implementation for
//! Google Gemini.
//!
//! Sends single-prompt requests to the Generative Language API
//! (`models/{model}:generateContent`) and returns the first candidate's
//! text. The API key is wrapped in [`secrecy::SecretString`] and is
//! never logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use tellerchain_core::gateway::CompletionGateway;
use tellerchain_types::error::GatewayError;

use super::types::{ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

/// Google Gemini completion gateway.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the request header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Default per-request timeout. Generation is bounded at 8k output
    /// tokens, so two minutes is already generous.
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash-lite")
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: build_http_client(Self::DEFAULT_TIMEOUT),
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        }
    }

    /// The configured model for this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Full `generateContent` URL for the configured model.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Wrap a prompt in the single-turn request body.
    fn to_generate_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to create reqwest client")
}

// GeminiClient intentionally does NOT derive Debug. The SecretString
// field would redact itself, but omitting Debug entirely keeps the key
// out of any formatting path.

impl CompletionGateway for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = self.to_generate_request(prompt);
        let url = self.url();

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // The envelope is JSON when Google produced the error; fall
            // back to the raw body for proxies that answer in plain text.
            let message = serde_json::from_str::<ApiErrorBody>(&error_body)
                .map(|body| body.error.message)
                .unwrap_or(error_body);
            return Err(match status.as_u16() {
                401 | 403 => GatewayError::AuthenticationFailed,
                429 => GatewayError::RateLimited,
                code => GatewayError::UpstreamStatus { status: code, message },
            });
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Deserialization(e.to_string()))?;

        decoded.text().ok_or(GatewayError::Empty)
    }
}
