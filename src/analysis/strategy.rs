//! The closed set of analysis strategies.

use std::sync::Arc;

use super::custom_html::CustomHtmlAnalyzer;
use super::options::AnalysisOptions;
use super::rules::RuleBasedAnalyzer;
use super::structured::StructuredAnalyzer;
use crate::llm::GenerationService;
use crate::models::AnalysisOutput;

/// One analysis backend, chosen once at startup.
pub enum Strategy {
    RuleBased(RuleBasedAnalyzer),
    CustomHtml(CustomHtmlAnalyzer),
    Structured(StructuredAnalyzer),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RuleBased(_) => "rule-based",
            Strategy::CustomHtml(_) => "custom-html",
            Strategy::Structured(_) => "structured-json",
        }
    }

    /// Generation service behind this strategy, if any.
    pub fn service(&self) -> Option<&Arc<dyn GenerationService>> {
        match self {
            Strategy::RuleBased(_) => None,
            Strategy::CustomHtml(a) => Some(a.service()),
            Strategy::Structured(a) => Some(a.service()),
        }
    }

    /// Run the strategy. AI-backed variants fall back internally.
    pub async fn analyze(&self, text: &str, options: &AnalysisOptions) -> AnalysisOutput {
        match self {
            Strategy::RuleBased(analyzer) => analyzer.analyze(text).into(),
            Strategy::CustomHtml(analyzer) => analyzer.analyze(text, options).await,
            Strategy::Structured(analyzer) => analyzer.analyze(text).await.into(),
        }
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.service() {
            Some(service) => write!(
                f,
                "Strategy({}, {}/{})",
                self.name(),
                service.provider_name(),
                service.model()
            ),
            None => write!(f, "Strategy({})", self.name()),
        }
    }
}
