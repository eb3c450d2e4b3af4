//! Configuration management using the prefer crate for discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::CallLimits;
use crate::llm::{LlmConfig, Provider};

/// Errors reading or parsing a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

/// Which analysis backend to select at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    /// No external service; rule-based analysis only.
    None,
    #[serde(alias = "rule-based")]
    Rules,
    #[default]
    Groq,
    Gemini,
}

impl ProviderChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderChoice::None => "none",
            ProviderChoice::Rules => "rules",
            ProviderChoice::Groq => "groq",
            ProviderChoice::Gemini => "gemini",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(ProviderChoice::None),
            "rules" | "rule-based" => Some(ProviderChoice::Rules),
            "groq" => Some(ProviderChoice::Groq),
            "gemini" => Some(ProviderChoice::Gemini),
            _ => None,
        }
    }

    /// External provider to build a client for, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            ProviderChoice::None | ProviderChoice::Rules => None,
            ProviderChoice::Groq => Some(Provider::Groq),
            ProviderChoice::Gemini => Some(Provider::Gemini),
        }
    }
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Analysis pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub provider: ProviderChoice,
    /// Shorter trimmed text is reported as too short.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    /// Append table, matrix, and flow sections to rule-based output.
    #[serde(default)]
    pub include_supplementary: bool,

    #[serde(default = "default_html_text_cap")]
    pub html_text_cap: usize,
    #[serde(default = "default_html_temperature")]
    pub html_temperature: f32,
    #[serde(default = "default_html_max_tokens")]
    pub html_max_tokens: u32,

    #[serde(default = "default_json_text_cap")]
    pub json_text_cap: usize,
    #[serde(default = "default_json_temperature")]
    pub json_temperature: f32,
    #[serde(default = "default_json_max_tokens")]
    pub json_max_tokens: u32,

    #[serde(default = "default_chat_text_cap")]
    pub chat_text_cap: usize,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,
}

fn default_min_text_length() -> usize {
    100
}
fn default_html_text_cap() -> usize {
    CallLimits::CUSTOM_HTML.text_cap
}
fn default_html_temperature() -> f32 {
    CallLimits::CUSTOM_HTML.temperature
}
fn default_html_max_tokens() -> u32 {
    CallLimits::CUSTOM_HTML.max_tokens
}
fn default_json_text_cap() -> usize {
    CallLimits::STRUCTURED.text_cap
}
fn default_json_temperature() -> f32 {
    CallLimits::STRUCTURED.temperature
}
fn default_json_max_tokens() -> u32 {
    CallLimits::STRUCTURED.max_tokens
}
fn default_chat_text_cap() -> usize {
    CallLimits::CHAT.text_cap
}
fn default_chat_temperature() -> f32 {
    CallLimits::CHAT.temperature
}
fn default_chat_max_tokens() -> u32 {
    CallLimits::CHAT.max_tokens
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: ProviderChoice::default(),
            min_text_length: default_min_text_length(),
            include_supplementary: false,
            html_text_cap: default_html_text_cap(),
            html_temperature: default_html_temperature(),
            html_max_tokens: default_html_max_tokens(),
            json_text_cap: default_json_text_cap(),
            json_temperature: default_json_temperature(),
            json_max_tokens: default_json_max_tokens(),
            chat_text_cap: default_chat_text_cap(),
            chat_temperature: default_chat_temperature(),
            chat_max_tokens: default_chat_max_tokens(),
        }
    }
}

impl AnalysisConfig {
    pub fn custom_html_limits(&self) -> CallLimits {
        CallLimits {
            text_cap: self.html_text_cap,
            temperature: self.html_temperature,
            max_tokens: self.html_max_tokens,
        }
    }

    pub fn structured_limits(&self) -> CallLimits {
        CallLimits {
            text_cap: self.json_text_cap,
            temperature: self.json_temperature,
            max_tokens: self.json_max_tokens,
        }
    }

    pub fn chat_limits(&self) -> CallLimits {
        CallLimits {
            text_cap: self.chat_text_cap,
            temperature: self.chat_temperature,
            max_tokens: self.chat_max_tokens,
        }
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// `DOCBOARD_PROVIDER` wins over `AI_PROVIDER`. Unparseable values are
    /// ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DOCBOARD_PROVIDER").or_else(|| lookup("AI_PROVIDER")) {
            match ProviderChoice::from_str(&val) {
                Some(choice) => self.provider = choice,
                None => warn!("Ignoring unknown AI provider '{}'", val),
            }
        }

        let numeric = [
            ("DOCBOARD_MIN_TEXT_LENGTH", &mut self.min_text_length),
            ("DOCBOARD_HTML_TEXT_CAP", &mut self.html_text_cap),
            ("DOCBOARD_JSON_TEXT_CAP", &mut self.json_text_cap),
            ("DOCBOARD_CHAT_TEXT_CAP", &mut self.chat_text_cap),
        ];
        for (key, field) in numeric {
            if let Some(val) = lookup(key) {
                match val.trim().parse() {
                    Ok(n) => *field = n,
                    Err(_) => warn!("Ignoring non-numeric {}='{}'", key, val),
                }
            }
        }

        if let Some(val) = lookup("DOCBOARD_INCLUDE_SUPPLEMENTARY") {
            self.include_supplementary = val.eq_ignore_ascii_case("true") || val == "1";
        }
        self
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover and load the config file, then apply environment overrides.
    ///
    /// A missing or broken file falls back to defaults.
    pub async fn load() -> Self {
        let config = match prefer::load("docboard").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_or_default(path).await,
                None => Self::default(),
            },
            Err(_) => {
                debug!("No docboard config file found, using defaults");
                Self::default()
            }
        };
        config.with_env_overrides()
    }

    /// Load an explicit config file (falling back to defaults), then apply
    /// environment overrides.
    pub async fn load_explicit(path: &Path) -> Self {
        Self::load_or_default(path).await.with_env_overrides()
    }

    async fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path).await {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Apply process environment overrides to every section.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.analysis = self.analysis.with_overrides(&lookup);
        self.llm = self.llm.with_overrides(&lookup);
        self
    }
}
