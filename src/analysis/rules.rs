//! Deterministic rule-based analyzer.
//!
//! Needs no external service and never fails, which makes it the fallback
//! for every AI-backed strategy.

use regex::Regex;
use std::sync::LazyLock;

use crate::heuristics::{extract_numbers, extract_tables, flow_chart, heatmap_chart};
use crate::models::{Chart, Dashboard, Dataset, Section, UiTheme};
use crate::utils::{html_escape, truncate_chars};

/// Title used when the first line of the text is blank.
pub const DEFAULT_TITLE: &str = "Document Analysis";

const TITLE_MAX_CHARS: usize = 100;
const EXCERPT_MAX_CHARS: usize = 500;
const MIN_METRICS: usize = 3;
const MAX_METRICS: usize = 6;
const METRICS_COLOR: &str = "#0ea5e9";

static ABSTRACT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(abstract|summary|executive summary)[:\s]+").unwrap());
static CONCLUSION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(conclusion|summary|findings)[:\s]+").unwrap());

/// Builds a minimal dashboard from heading and number heuristics.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer {
    include_supplementary: bool,
}

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append table, matrix, and flow sections when detected.
    pub fn with_supplementary(mut self, include: bool) -> Self {
        self.include_supplementary = include;
        self
    }

    pub fn analyze(&self, text: &str) -> Dashboard {
        let mut sections = Vec::new();

        if let Some(excerpt) = excerpt_after(&ABSTRACT_HEADING, text) {
            sections.push(Section::new("abstract", "Abstract", paragraph(excerpt)));
        }

        if let Some(section) = metrics_section(text) {
            sections.push(section);
        }

        // May repeat the abstract excerpt when both match "summary".
        if let Some(excerpt) = excerpt_after(&CONCLUSION_HEADING, text) {
            sections.push(Section::new("conclusion", "Conclusion", paragraph(excerpt)));
        }

        if self.include_supplementary {
            sections.extend(supplementary_sections(text));
        }

        Dashboard {
            title: title_of(text),
            export_html: Dashboard::merged_html(&sections),
            sections,
            ui_theme: UiTheme::default(),
            share_ready: true,
        }
    }
}

fn title_of(text: &str) -> String {
    match text.lines().next() {
        Some(line) if !line.trim().is_empty() => truncate_chars(line, TITLE_MAX_CHARS).to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Text following the first heading match, up to the next blank line.
fn excerpt_after<'a>(heading: &Regex, text: &'a str) -> Option<&'a str> {
    let found = heading.find(text)?;
    let rest = &text[found.end()..];
    let end = rest.find("\n\n").unwrap_or(rest.len());
    Some(&rest[..end])
}

fn paragraph(excerpt: &str) -> String {
    format!(
        "<p>{}</p>",
        html_escape(truncate_chars(excerpt, EXCERPT_MAX_CHARS))
    )
}

fn metrics_section(text: &str) -> Option<Section> {
    let numbers = extract_numbers(text);
    if numbers.len() < MIN_METRICS {
        return None;
    }

    let values: Vec<f64> = numbers.into_iter().take(MAX_METRICS).collect();
    let labels = (1..=values.len()).map(|i| format!("Metric {}", i)).collect();
    let chart = Chart::bar(
        labels,
        Dataset {
            label: "Values".to_string(),
            data: values,
            color: Some(METRICS_COLOR.to_string()),
        },
    );

    Some(
        Section::new(
            "metrics",
            "Key Metrics",
            "<p>Numerical data extracted from the document.</p>",
        )
        .with_chart(chart),
    )
}

fn supplementary_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();

    let tables = extract_tables(text);
    if !tables.is_empty() {
        let html: String = tables.iter().map(|t| t.to_html()).collect();
        sections.push(Section::new("tables", "Data Tables", html));
    }

    if let Some(heatmap) = heatmap_chart(text) {
        sections.push(
            Section::new(
                "matrix",
                "Value Matrix",
                "<p>Illustrative only: the leading numbers of the document arranged as a grid, \
                 not a measured correlation.</p>",
            )
            .with_chart(Chart::Heatmap(heatmap)),
        );
    }

    if let Some(flow) = flow_chart(text) {
        sections.push(
            Section::new(
                "flow",
                "Flow",
                "<p>Illustrative only: placeholder flow structure, not values taken from the \
                 document.</p>",
            )
            .with_chart(Chart::Sankey(flow)),
        );
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartType;

    const PAPER: &str = "Effects of Sleep on Memory\n\n\
        Abstract: The quick brown fox jumps. \n\n\
        We studied 48 participants over 12 weeks.\n\n\
        Conclusion: Sleep helps recall.";

    #[test]
    fn test_abstract_section() {
        let dashboard = RuleBasedAnalyzer::new().analyze(PAPER);
        let section = dashboard.section("abstract").unwrap();

        assert_eq!(section.title, "Abstract");
        assert!(section.content_html.contains("The quick brown fox jumps."));
        assert!(section.content_html.starts_with("<p>") && section.content_html.ends_with("</p>"));
        assert!(section.chart.is_none());
    }

    #[test]
    fn test_section_order_and_export() {
        let dashboard = RuleBasedAnalyzer::new().analyze(PAPER);
        let ids: Vec<&str> = dashboard.sections.iter().map(|s| s.id.as_str()).collect();

        // Only two numbers, so no metrics.
        assert_eq!(ids, vec!["abstract", "conclusion"]);
        assert_eq!(dashboard.title, "Effects of Sleep on Memory");
        assert_eq!(
            dashboard.export_html,
            "<section><h2>Abstract</h2><p>The quick brown fox jumps. </p>\
             <h2>Conclusion</h2><p>Sleep helps recall.</p></section>"
        );
        assert!(dashboard.share_ready);
    }

    #[test]
    fn test_metrics_take_first_six() {
        let dashboard = RuleBasedAnalyzer::new().analyze("Numbers 1 2 3 4 5 6 7");
        let section = dashboard.section("metrics").unwrap();
        let chart = section.chart.as_ref().unwrap();

        assert_eq!(chart.chart_type(), ChartType::Bar);
        let series = chart.series().unwrap();
        assert_eq!(
            series.labels,
            vec!["Metric 1", "Metric 2", "Metric 3", "Metric 4", "Metric 5", "Metric 6"]
        );
        assert_eq!(series.datasets[0].label, "Values");
        assert_eq!(series.datasets[0].data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_two_numbers_no_metrics() {
        let dashboard = RuleBasedAnalyzer::new().analyze("Only 1 and 2 here");
        assert!(dashboard.section("metrics").is_none());
    }

    #[test]
    fn test_summary_fires_both_sections() {
        // Kept as-is: "summary" satisfies both heading patterns.
        let text = "Report\nSummary: revenue held steady.\n\nMore text.";
        let dashboard = RuleBasedAnalyzer::new().analyze(text);

        let abstract_html = &dashboard.section("abstract").unwrap().content_html;
        let conclusion_html = &dashboard.section("conclusion").unwrap().content_html;
        assert_eq!(abstract_html, conclusion_html);
        assert_eq!(abstract_html, "<p>revenue held steady.</p>");
    }

    #[test]
    fn test_no_heuristics_fire() {
        let dashboard = RuleBasedAnalyzer::new().analyze("plain words without any markers");
        assert!(dashboard.sections.is_empty());
        assert_eq!(dashboard.export_html, "<section></section>");
        assert!(dashboard.share_ready);
    }

    #[test]
    fn test_idempotent() {
        let analyzer = RuleBasedAnalyzer::new().with_supplementary(true);
        let text = format!("{}\na|b\n1|2\nbudget transfer", PAPER);
        let first = serde_json::to_string(&analyzer.analyze(&text)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&text)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_excerpt_truncated_and_escaped() {
        let body = "x".repeat(600);
        let text = format!("T\nAbstract: <b>{}</b>", body);
        let dashboard = RuleBasedAnalyzer::new().analyze(&text);
        let html = &dashboard.section("abstract").unwrap().content_html;

        assert!(html.starts_with("<p>&lt;b&gt;xxx"));
        assert!(!html.contains("</b>"));
        // 3 chars of "<b>" plus 497 x's survive truncation.
        assert_eq!(html.matches('x').count(), 497);
    }

    #[test]
    fn test_title_rules() {
        let long_line = "y".repeat(150);
        let dashboard = RuleBasedAnalyzer::new().analyze(&long_line);
        assert_eq!(dashboard.title.chars().count(), 100);

        let dashboard = RuleBasedAnalyzer::new().analyze("\nsecond line");
        assert_eq!(dashboard.title, DEFAULT_TITLE);

        let dashboard = RuleBasedAnalyzer::new().analyze("");
        assert_eq!(dashboard.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_supplementary_off_by_default() {
        let text = "T\na|b\n1|2\n1 2 3 4 5 6 7 8 9 budget";
        let dashboard = RuleBasedAnalyzer::new().analyze(text);
        assert!(dashboard.section("tables").is_none());
        assert!(dashboard.section("matrix").is_none());
        assert!(dashboard.section("flow").is_none());
    }

    #[test]
    fn test_supplementary_sections_appended() {
        let text = "T\na|b\n1|2\n\n3 4 5 6 7 8 9 budget transfer";
        let dashboard = RuleBasedAnalyzer::new()
            .with_supplementary(true)
            .analyze(text);
        let ids: Vec<&str> = dashboard.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["metrics", "tables", "matrix", "flow"]);

        let tables = dashboard.section("tables").unwrap();
        assert!(tables.content_html.starts_with("<table>"));

        let matrix = dashboard.section("matrix").unwrap();
        assert!(matrix.chart.as_ref().unwrap().is_illustrative());
        assert!(matrix.content_html.contains("Illustrative"));

        let flow = dashboard.section("flow").unwrap();
        assert_eq!(flow.chart.as_ref().unwrap().chart_type(), ChartType::Sankey);
        assert!(dashboard.export_html.contains("<h2>Flow</h2>"));
    }
}
