//! Prompt templates for the generation-backed strategies.

use super::options::AnalysisOptions;

const CUSTOM_HTML_PROMPT: &str = r#"You are a senior frontend developer and data-visualization designer. Read the document below and build a single, self-contained HTML dashboard that presents it.

Requirements:
1. Output one complete HTML5 document, starting with <!DOCTYPE html>. Inline all CSS in a <style> block.
2. The layout must be responsive (CSS grid or flexbox, with @media rules for narrow screens).
3. Open with a header holding the document title and a one-paragraph overview.
4. Organize the content into cards: key findings, methodology or approach, figures and metrics, risks or limitations, and conclusions. Include only the cards the document supports.
5. Chart only numbers that actually appear in the document. You may load Chart.js from https://cdn.jsdelivr.net/npm/chart.js. Never invent data.
6. Render any tabular data as an HTML table.
{summary_instruction}{custom_instructions}
Respond with the HTML document only. Do not add explanations or Markdown fences.

----- DOCUMENT START -----

{content}

----- DOCUMENT END -----
"#;

const STRUCTURED_PROMPT: &str = r##"You turn documents (research papers, reports, strategy or business documents) into a structured dashboard description. Pick the sections that the document actually supports, such as abstract, objectives, methodology, results, metrics, risks, recommendations, or conclusion.

Return one JSON object with exactly this shape:

{
  "title": "Main title",
  "sections": [
    {
      "id": "unique_section_id",
      "title": "Section title",
      "content_html": "<p>Section body</p>",
      "chart": null
    }
  ],
  "ui_theme": {
    "primary_color": "#0ea5e9",
    "accent_color": "#6366f1",
    "layout": "single-column"
  },
  "export_html": "<section>All sections merged in display order</section>",
  "share_ready": true
}

Rules:
- Every section "id" must be unique.
- "content_html" and "export_html" may use only <p>, <ul>, <ol>, <li>, <strong>, <em>, <h3>, <h4>, <table>, <tr>, <th>, <td>, <div>, <section>. No <script>, <style>, <link>, <iframe>, inline style attributes, class attributes, or event handlers.
- "layout" must be one of: single-column, two-column, dashboard-cards, scientific-paper. Use scientific-paper for academic papers, dashboard-cards for business or market documents, two-column for strategy documents.
- A chart, when present, is {"type": "line|bar|pie|doughnut|radar|scatter|bubble", "labels": [...], "datasets": [{"label": "...", "data": [numbers], "color": "#HEX"}]}. Use only values that appear in the document. Set "chart" to null when there are none.
- Output pure JSON. No Markdown, no code fences, no commentary.

----- DOCUMENT START -----

{content}

----- DOCUMENT END -----
"##;

const CHAT_PROMPT: &str = r#"You are a helpful assistant. Answer the question using ONLY the document below. If the document does not contain the answer, say so.

DOCUMENT:
{content}

QUESTION:
{question}

ANSWER:
"#;

/// Prompt for the standalone-HTML dashboard.
pub fn custom_html_prompt(content: &str, options: &AnalysisOptions) -> String {
    let summary_instruction = match options.summary_length.instruction() {
        "" => String::new(),
        instruction => format!("7. {}\n", instruction),
    };
    let custom_instructions = options
        .custom_prompt()
        .map(|p| {
            format!(
                "\nUser instructions (take priority over the defaults above):\n{}\n",
                p
            )
        })
        .unwrap_or_default();

    fill(
        CUSTOM_HTML_PROMPT,
        &[
            ("summary_instruction", summary_instruction.as_str()),
            ("custom_instructions", custom_instructions.as_str()),
            ("content", content),
        ],
    )
}

/// Prompt for the JSON dashboard.
pub fn structured_prompt(content: &str) -> String {
    fill(STRUCTURED_PROMPT, &[("content", content)])
}

pub fn chat_prompt(content: &str, question: &str) -> String {
    fill(CHAT_PROMPT, &[("content", content), ("question", question)])
}

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never scanned again, so user text containing a
/// placeholder name is kept literally.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let matched = values.iter().find_map(|(name, value)| {
            let inner = tail.strip_prefix('{')?.strip_prefix(*name)?;
            inner.strip_prefix('}').map(|after| (*value, after))
        });
        match matched {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
