//! The canonical dashboard document.

use serde::{Deserialize, Serialize};

use super::chart::Chart;
use crate::utils::html_escape;

/// Layout hint for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    SingleColumn,
    TwoColumn,
    DashboardCards,
    ScientificPaper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTheme {
    pub primary_color: String,
    pub accent_color: String,
    pub layout: Layout,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            primary_color: "#0ea5e9".to_string(),
            accent_color: "#6366f1".to_string(),
            layout: Layout::SingleColumn,
        }
    }
}

impl UiTheme {
    /// Theme used for error dashboards.
    pub fn error() -> Self {
        Self {
            primary_color: "#ef4444".to_string(),
            accent_color: "#dc2626".to_string(),
            layout: Layout::SingleColumn,
        }
    }
}

/// One titled content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content_html: String,
    #[serde(default)]
    pub chart: Option<Chart>,
}

impl Section {
    pub fn new(id: &str, title: &str, content_html: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content_html: content_html.into(),
            chart: None,
        }
    }

    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.chart = Some(chart);
        self
    }
}

/// Structured dashboard description consumed by an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub ui_theme: UiTheme,
    #[serde(default)]
    pub export_html: String,
    #[serde(default)]
    pub share_ready: bool,
}

impl Dashboard {
    /// Merge sections into a single embeddable fragment, in order.
    pub fn merged_html(sections: &[Section]) -> String {
        let mut html = String::from("<section>");
        for section in sections {
            html.push_str("<h2>");
            html.push_str(&section.title);
            html.push_str("</h2>");
            html.push_str(&section.content_html);
        }
        html.push_str("</section>");
        html
    }

    /// Dashboard reporting a failure in place of document content.
    pub fn error(message: &str) -> Self {
        let sections = vec![Section::new(
            "error",
            "Error",
            format!("<p>{}</p>", html_escape(message)),
        )];
        Self {
            title: "Analysis Error".to_string(),
            export_html: Self::merged_html(&sections),
            sections,
            ui_theme: UiTheme::error(),
            share_ready: false,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_dashboard_shape() {
        let dashboard = Dashboard::error("Document too short or empty");

        assert_eq!(dashboard.title, "Analysis Error");
        assert!(!dashboard.share_ready);
        assert_eq!(dashboard.sections.len(), 1);
        assert_eq!(dashboard.sections[0].title, "Error");
        assert_eq!(
            dashboard.export_html,
            "<section><h2>Error</h2><p>Document too short or empty</p></section>"
        );
        assert_eq!(dashboard.ui_theme.primary_color, "#ef4444");
    }

    #[test]
    fn test_error_message_is_escaped() {
        let dashboard = Dashboard::error("bad <input>");
        assert!(dashboard.export_html.contains("bad &lt;input&gt;"));
    }

    #[test]
    fn test_merged_html_empty() {
        assert_eq!(Dashboard::merged_html(&[]), "<section></section>");
    }

    #[test]
    fn test_section_without_chart_serializes_null() {
        let section = Section::new("abstract", "Abstract", "<p>x</p>");
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["chart"], serde_json::Value::Null);
    }

    #[test]
    fn test_layout_values() {
        let theme: UiTheme = serde_json::from_value(json!({
            "primary_color": "#111111",
            "accent_color": "#222222",
            "layout": "scientific-paper"
        }))
        .unwrap();
        assert_eq!(theme.layout, Layout::ScientificPaper);

        let rejected: Result<UiTheme, _> = serde_json::from_value(json!({
            "primary_color": "#111111",
            "accent_color": "#222222",
            "layout": "corporate"
        }));
        assert!(rejected.is_err());
    }
}
