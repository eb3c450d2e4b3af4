//! Strategy selection and per-request dispatch.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::chat::{ChatResponse, DocumentChat};
use super::custom_html::CustomHtmlAnalyzer;
use super::options::AnalysisOptions;
use super::rules::RuleBasedAnalyzer;
use super::strategy::Strategy;
use super::structured::StructuredAnalyzer;
use crate::config::Config;
use crate::extract::{ExtractionError, TextExtractor};
use crate::llm::{build_service, GenerationService, Provider};
use crate::models::{AnalysisOutput, Dashboard};

/// Error message for missing or too-short text.
pub const INSUFFICIENT_CONTENT: &str = "Document too short or empty";

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 100;

/// Entry point for analysis and chat.
///
/// The strategy is fixed at construction and never changes; the
/// orchestrator holds no mutable state and can be shared across tasks.
#[derive(Debug)]
pub struct Orchestrator {
    strategy: Strategy,
    chat: DocumentChat,
    extractor: TextExtractor,
    min_text_length: usize,
}

impl Orchestrator {
    /// Use `strategy`; chat goes through the same service, if it has one.
    pub fn new(strategy: Strategy) -> Self {
        let chat = DocumentChat::new(strategy.service().cloned());
        Self {
            strategy,
            chat,
            extractor: TextExtractor::new(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Select the strategy from configuration.
    ///
    /// A provider whose client cannot be built degrades to rule-based
    /// analysis with a single warning; construction never fails.
    pub fn from_config(config: &Config) -> Self {
        let analysis = &config.analysis;
        let rules = RuleBasedAnalyzer::new().with_supplementary(analysis.include_supplementary);

        let strategy = match analysis.provider.provider() {
            None => Strategy::RuleBased(rules),
            Some(provider) => match build_service(provider, &config.llm) {
                Ok(service) => Self::ai_strategy(provider, service, rules, config),
                Err(e) => {
                    warn!(
                        "{} backend unavailable ({}); using rule-based analysis",
                        provider, e
                    );
                    Strategy::RuleBased(rules)
                }
            },
        };

        match strategy.service() {
            Some(service) => info!(
                "Analysis strategy: {} via {} ({})",
                strategy.name(),
                service.provider_name(),
                service.model()
            ),
            None => info!("Analysis strategy: {}", strategy.name()),
        }

        let chat = DocumentChat::new(strategy.service().cloned())
            .with_limits(analysis.chat_limits());
        Self {
            strategy,
            chat,
            extractor: TextExtractor::new(),
            min_text_length: analysis.min_text_length,
        }
    }

    fn ai_strategy(
        provider: Provider,
        service: Arc<dyn GenerationService>,
        rules: RuleBasedAnalyzer,
        config: &Config,
    ) -> Strategy {
        match provider {
            Provider::Groq => Strategy::CustomHtml(
                CustomHtmlAnalyzer::new(service, rules)
                    .with_limits(config.analysis.custom_html_limits()),
            ),
            Provider::Gemini => Strategy::Structured(
                StructuredAnalyzer::new(service, rules)
                    .with_limits(config.analysis.structured_limits()),
            ),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn chat_available(&self) -> bool {
        self.chat.is_available()
    }

    /// Analyze extracted text. Never fails: short text yields an error
    /// dashboard and backend failures fall back to rule-based output.
    pub async fn analyze(&self, text: &str, options: &AnalysisOptions) -> AnalysisOutput {
        let length = text.trim().chars().count();
        if length < self.min_text_length {
            warn!(
                "Document text too short ({} chars, minimum {})",
                length, self.min_text_length
            );
            return Dashboard::error(INSUFFICIENT_CONTENT).into();
        }

        self.strategy.analyze(text, options).await
    }

    /// Extract and analyze a file. Extraction failures become an error
    /// dashboard naming the failure.
    pub async fn analyze_file(&self, path: &Path, options: &AnalysisOptions) -> AnalysisOutput {
        match self.extract(path) {
            Ok(text) => self.analyze(&text, options).await,
            Err(e) => {
                warn!("Extraction failed for {}: {}", path.display(), e);
                Dashboard::error(&e.to_string()).into()
            }
        }
    }

    pub fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        self.extractor.extract_path(path)
    }

    /// Answer a question about previously extracted text.
    pub async fn chat(&self, text: &str, question: &str) -> ChatResponse {
        self.chat.ask(text, question).await
    }
}
