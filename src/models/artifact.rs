//! Results of a single analysis call.

use serde::{Deserialize, Serialize};

use super::dashboard::Dashboard;

/// Standalone HTML document authored by a generation service.
///
/// Only the document string is exposed; the extracted text is kept for
/// later chat requests against the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHtmlArtifact {
    pub html_content: String,
    pub is_custom_html: bool,
    pub text_content: String,
}

impl CustomHtmlArtifact {
    pub fn new(html_content: String, text_content: String) -> Self {
        Self {
            html_content,
            is_custom_html: true,
            text_content,
        }
    }
}

/// Output of an analysis: a structured dashboard or an opaque HTML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Dashboard(Dashboard),
    CustomHtml(CustomHtmlArtifact),
}

impl AnalysisOutput {
    pub fn is_custom_html(&self) -> bool {
        matches!(self, AnalysisOutput::CustomHtml(_))
    }

    pub fn as_dashboard(&self) -> Option<&Dashboard> {
        match self {
            AnalysisOutput::Dashboard(d) => Some(d),
            AnalysisOutput::CustomHtml(_) => None,
        }
    }

    pub fn into_dashboard(self) -> Option<Dashboard> {
        match self {
            AnalysisOutput::Dashboard(d) => Some(d),
            AnalysisOutput::CustomHtml(_) => None,
        }
    }

    /// Plain text retained for chat, when the output carries it.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            AnalysisOutput::Dashboard(_) => None,
            AnalysisOutput::CustomHtml(a) => Some(&a.text_content),
        }
    }
}

impl From<Dashboard> for AnalysisOutput {
    fn from(dashboard: Dashboard) -> Self {
        AnalysisOutput::Dashboard(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_html_envelope() {
        let output = AnalysisOutput::CustomHtml(CustomHtmlArtifact::new(
            "<!DOCTYPE html><html></html>".to_string(),
            "source text".to_string(),
        ));

        assert!(output.is_custom_html());
        assert_eq!(output.text_content(), Some("source text"));
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "html_content": "<!DOCTYPE html><html></html>",
                "is_custom_html": true,
                "text_content": "source text"
            })
        );
    }

    #[test]
    fn test_dashboard_envelope_is_untagged() {
        let output = AnalysisOutput::from(Dashboard::error("x"));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["title"], "Analysis Error");
        assert!(value.get("is_custom_html").is_none());
        assert!(output.as_dashboard().is_some());
    }
}
