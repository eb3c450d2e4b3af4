//! Strategy that asks a generation service for a standalone HTML dashboard.

use std::sync::Arc;
use tracing::{debug, warn};

use super::options::{AnalysisOptions, CallLimits};
use super::prompts::custom_html_prompt;
use super::rules::RuleBasedAnalyzer;
use crate::llm::{GenerationRequest, GenerationService, LlmError};
use crate::models::{AnalysisOutput, CustomHtmlArtifact};
use crate::utils::{strip_code_fences, truncate_chars};

pub struct CustomHtmlAnalyzer {
    service: Arc<dyn GenerationService>,
    fallback: RuleBasedAnalyzer,
    limits: CallLimits,
}

impl CustomHtmlAnalyzer {
    pub fn new(service: Arc<dyn GenerationService>, fallback: RuleBasedAnalyzer) -> Self {
        Self {
            service,
            fallback,
            limits: CallLimits::CUSTOM_HTML,
        }
    }

    pub fn with_limits(mut self, limits: CallLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn service(&self) -> &Arc<dyn GenerationService> {
        &self.service
    }

    /// Generate the HTML document, or the rule-based dashboard on any failure.
    pub async fn analyze(&self, text: &str, options: &AnalysisOptions) -> AnalysisOutput {
        match self.generate(text, options).await {
            Ok(html) => AnalysisOutput::CustomHtml(CustomHtmlArtifact::new(html, text.to_string())),
            Err(e) => {
                warn!(
                    "{} dashboard generation failed, falling back to rule-based analysis: {}",
                    self.service.provider_name(),
                    e
                );
                AnalysisOutput::Dashboard(self.fallback.analyze(text))
            }
        }
    }

    async fn generate(&self, text: &str, options: &AnalysisOptions) -> Result<String, LlmError> {
        let content = truncate_chars(text, self.limits.text_cap);
        let request = GenerationRequest::new(
            custom_html_prompt(content, options),
            self.limits.temperature,
            self.limits.max_tokens,
        );

        debug!(
            "Requesting HTML dashboard from {} ({} of {} chars)",
            self.service.model(),
            content.chars().count(),
            text.chars().count()
        );
        let response = self.service.generate(&request).await?;

        let html = strip_code_fences(&response, "html");
        if html.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::StubService;

    const TEXT: &str = "Quarterly Report\n\nSummary: Sales rose 4 percent across 3 regions in 2024.\n\nEnd.";

    #[tokio::test]
    async fn test_returns_custom_html_artifact() {
        let stub = StubService::replying("```html\n<!DOCTYPE html><html><body>ok</body></html>\n```");
        let analyzer = CustomHtmlAnalyzer::new(stub.clone(), RuleBasedAnalyzer::new());

        let output = analyzer.analyze(TEXT, &AnalysisOptions::new()).await;
        match output {
            AnalysisOutput::CustomHtml(artifact) => {
                assert_eq!(
                    artifact.html_content,
                    "<!DOCTYPE html><html><body>ok</body></html>"
                );
                assert!(artifact.is_custom_html);
                assert_eq!(artifact.text_content, TEXT);
            }
            other => panic!("expected custom HTML, got {:?}", other),
        }

        let request = stub.last_request().unwrap();
        assert_eq!(request.temperature, 0.5);
        assert_eq!(request.max_tokens, 8000);
        assert!(request.prompt.contains("Sales rose 4 percent"));
    }

    #[tokio::test]
    async fn test_failure_matches_rule_based_output() {
        let analyzer = CustomHtmlAnalyzer::new(StubService::failing(), RuleBasedAnalyzer::new());

        let output = analyzer.analyze(TEXT, &AnalysisOptions::new()).await;
        let expected = AnalysisOutput::Dashboard(RuleBasedAnalyzer::new().analyze(TEXT));
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            serde_json::to_string(&expected).unwrap()
        );
    }

    #[tokio::test]
    async fn test_bare_fence_is_empty_response() {
        let analyzer =
            CustomHtmlAnalyzer::new(StubService::replying("```html\n```"), RuleBasedAnalyzer::new());
        let output = analyzer.analyze(TEXT, &AnalysisOptions::new()).await;
        assert!(!output.is_custom_html());
    }

    #[tokio::test]
    async fn test_text_capped_in_prompt() {
        let stub = StubService::replying("<html></html>");
        let analyzer = CustomHtmlAnalyzer::new(stub.clone(), RuleBasedAnalyzer::new()).with_limits(
            CallLimits {
                text_cap: 10,
                ..CallLimits::CUSTOM_HTML
            },
        );

        let text = format!("0123456789{}", "Z".repeat(50));
        analyzer.analyze(&text, &AnalysisOptions::new()).await;

        let prompt = stub.last_request().unwrap().prompt;
        assert!(prompt.contains("0123456789"));
        assert!(!prompt.contains('Z'));
    }
}
