//! Provider settings for the generation clients.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Groq (OpenAI-compatible chat completions) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default = "default_groq_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    /// Never written back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_groq_endpoint() -> String {
    DEFAULT_GROQ_ENDPOINT.to_string()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: default_groq_endpoint(),
            model: default_groq_model(),
            api_key: None,
        }
    }
}

/// Google Gemini (`generateContent`) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_endpoint() -> String {
    DEFAULT_GEMINI_ENDPOINT.to_string()
}
fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_gemini_endpoint(),
            model: default_gemini_model(),
            api_key: None,
        }
    }
}

/// Settings for every supported provider plus shared client options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            groq: GroqConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Apply process environment overrides.
    ///
    /// Recognized variables:
    /// - `GROQ_API_KEY`, `GROQ_MODEL`, `GROQ_ENDPOINT`
    /// - `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_ENDPOINT`
    /// - `DOCBOARD_LLM_TIMEOUT_SECS`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GROQ_API_KEY") {
            self.groq.api_key = Some(val);
        }
        if let Some(val) = lookup("GROQ_MODEL") {
            self.groq.model = val;
        }
        if let Some(val) = lookup("GROQ_ENDPOINT") {
            self.groq.endpoint = val;
        }

        if let Some(val) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = Some(val);
        }
        if let Some(val) = lookup("GEMINI_MODEL") {
            self.gemini.model = val;
        }
        if let Some(val) = lookup("GEMINI_ENDPOINT") {
            self.gemini.endpoint = val;
        }

        if let Some(val) = lookup("DOCBOARD_LLM_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }
        self
    }
}
