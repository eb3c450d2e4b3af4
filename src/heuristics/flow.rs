//! Keyword-gated flow graph placeholder.

use crate::models::{Provenance, SankeyChart, SankeyLinks, SankeyNodes};

/// Substrings that suggest the text describes a flow of some quantity.
pub const FLOW_KEYWORDS: [&str; 6] = ["from", "to", "flow", "transfer", "allocation", "budget"];

/// Fixed four-node sankey emitted when the text mentions a flow keyword.
///
/// Nothing is derived from the text beyond the keyword match, so the chart
/// is always tagged illustrative.
pub fn flow_chart(text: &str) -> Option<SankeyChart> {
    let lowered = text.to_lowercase();
    if !FLOW_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return None;
    }

    Some(SankeyChart {
        node: SankeyNodes {
            label: ["Source A", "Source B", "Target X", "Target Y"]
                .into_iter()
                .map(String::from)
                .collect(),
            color: ["#0ea5e9", "#6366f1", "#10b981", "#f59e0b"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        link: SankeyLinks {
            source: vec![0, 0, 1, 1],
            target: vec![2, 3, 2, 3],
            value: vec![8.0, 4.0, 2.0, 8.0],
        },
        provenance: Provenance::Illustrative,
    })
}
