//! External text-generation services.
//!
//! Analysis strategies and document chat talk to a [`GenerationService`];
//! the Groq and Gemini HTTP clients implement it. Clients are stateless
//! per call and safe to share behind an `Arc`.

mod config;
mod gemini;
mod groq;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use config::{GeminiConfig, GroqConfig, LlmConfig};
pub use gemini::GeminiClient;
pub use groq::GroqClient;

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing credential or unusable client configuration.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Failed to reach the service
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx response or an error payload
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Empty response from model")]
    EmptyResponse,

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single prompt sent to a generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// Uniform contract over external generation backends.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Short provider identifier (e.g. "groq").
    fn provider_name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Send one prompt and return the trimmed response text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// Which external provider to build a client for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build a shared client for `provider`, or explain why it cannot be built.
pub fn build_service(
    provider: Provider,
    config: &LlmConfig,
) -> Result<Arc<dyn GenerationService>, LlmError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    Ok(match provider {
        Provider::Groq => Arc::new(GroqClient::new(config.groq.clone(), timeout)?),
        Provider::Gemini => Arc::new(GeminiClient::new(config.gemini.clone(), timeout)?),
    })
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::NotConfigured(format!("Failed to create HTTP client: {}", e)))
}

/// Credential with surrounding whitespace removed; blank counts as missing.
fn usable_key(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}
