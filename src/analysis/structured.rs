//! Strategy that asks a generation service for dashboard JSON.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::options::CallLimits;
use super::prompts::structured_prompt;
use super::rules::RuleBasedAnalyzer;
use crate::llm::{GenerationRequest, GenerationService, LlmError};
use crate::models::Dashboard;
use crate::utils::{find_disallowed_markup, strip_code_fences, truncate_chars};

/// A generated response that does not satisfy the dashboard contract.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid dashboard JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),

    #[error("Disallowed markup ({what}) in {field}")]
    DisallowedMarkup { field: String, what: &'static str },
}

#[derive(Debug, Error)]
enum StructuredError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Parse and validate a generated dashboard.
///
/// Strips Markdown fences, requires unique section ids and clean markup,
/// and rebuilds a blank `export_html` from the sections. Nothing else is
/// repaired.
pub fn parse_dashboard(response: &str) -> Result<Dashboard, SchemaError> {
    let json = strip_code_fences(response, "json");
    let mut dashboard: Dashboard = serde_json::from_str(&json)?;

    let mut seen = HashSet::new();
    for section in &dashboard.sections {
        if !seen.insert(section.id.as_str()) {
            return Err(SchemaError::DuplicateSectionId(section.id.clone()));
        }
        check_markup(&section.title, || format!("sections[{}].title", section.id))?;
        check_markup(&section.content_html, || {
            format!("sections[{}].content_html", section.id)
        })?;
    }

    if dashboard.export_html.trim().is_empty() {
        dashboard.export_html = Dashboard::merged_html(&dashboard.sections);
    }
    check_markup(&dashboard.export_html, || "export_html".to_string())?;

    Ok(dashboard)
}

fn check_markup(fragment: &str, field: impl FnOnce() -> String) -> Result<(), SchemaError> {
    match find_disallowed_markup(fragment) {
        Some(what) => Err(SchemaError::DisallowedMarkup {
            field: field(),
            what,
        }),
        None => Ok(()),
    }
}

pub struct StructuredAnalyzer {
    service: Arc<dyn GenerationService>,
    fallback: RuleBasedAnalyzer,
    limits: CallLimits,
}

impl StructuredAnalyzer {
    pub fn new(service: Arc<dyn GenerationService>, fallback: RuleBasedAnalyzer) -> Self {
        Self {
            service,
            fallback,
            limits: CallLimits::STRUCTURED,
        }
    }

    pub fn with_limits(mut self, limits: CallLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn service(&self) -> &Arc<dyn GenerationService> {
        &self.service
    }

    /// Generated dashboard, or the rule-based one on any failure.
    pub async fn analyze(&self, text: &str) -> Dashboard {
        match self.generate(text).await {
            Ok(dashboard) => dashboard,
            Err(e) => {
                warn!(
                    "{} dashboard generation failed, falling back to rule-based analysis: {}",
                    self.service.provider_name(),
                    e
                );
                self.fallback.analyze(text)
            }
        }
    }

    async fn generate(&self, text: &str) -> Result<Dashboard, StructuredError> {
        let content = truncate_chars(text, self.limits.text_cap);
        let request = GenerationRequest::new(
            structured_prompt(content),
            self.limits.temperature,
            self.limits.max_tokens,
        );

        debug!(
            "Requesting dashboard JSON from {} ({} chars)",
            self.service.model(),
            content.chars().count()
        );
        let response = self.service.generate(&request).await?;
        Ok(parse_dashboard(&response)?)
    }
}
