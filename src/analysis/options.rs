//! Per-call analysis options and generation limits.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Requested summary depth for the custom-HTML strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Brief,
    #[default]
    Standard,
    Detailed,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Brief => "brief",
            SummaryLength::Standard => "standard",
            SummaryLength::Detailed => "detailed",
        }
    }

    /// Prompt fragment for this length; empty for `Standard`.
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryLength::Brief => {
                "Keep summaries concise and high-level. Focus on bullet points."
            }
            SummaryLength::Standard => "",
            SummaryLength::Detailed => {
                "Provide in-depth comprehensive summaries and detailed analysis."
            }
        }
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brief" => Ok(SummaryLength::Brief),
            "standard" => Ok(SummaryLength::Standard),
            "detailed" => Ok(SummaryLength::Detailed),
            other => Err(format!("unknown summary length: {}", other)),
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User customization for a single analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub summary_length: SummaryLength,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    pub fn with_summary_length(mut self, length: SummaryLength) -> Self {
        self.summary_length = length;
        self
    }

    /// Custom instructions, if any non-blank text was supplied.
    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Bounds for one external-call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallLimits {
    /// Maximum characters of document text embedded in the prompt.
    pub text_cap: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CallLimits {
    pub const CUSTOM_HTML: Self = Self {
        text_cap: 25_000,
        temperature: 0.5,
        max_tokens: 8_000,
    };
    pub const STRUCTURED: Self = Self {
        text_cap: 15_000,
        temperature: 0.4,
        max_tokens: 8_192,
    };
    pub const CHAT: Self = Self {
        text_cap: 20_000,
        temperature: 0.3,
        max_tokens: 1_000,
    };
}
