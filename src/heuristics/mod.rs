//! Heuristic miners over plain text.
//!
//! Each extractor is independent and side-effect free. A missing signal
//! yields `None` or an empty list; no input makes them fail.

mod flow;
mod matrix;
mod tables;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub use flow::{flow_chart, FLOW_KEYWORDS};
pub use matrix::{heatmap_chart, MAX_MATRIX_SIDE, MIN_MATRIX_VALUES};
pub use tables::{extract_tables, Table};

use crate::models::{HeatmapChart, SankeyChart};

/// Integer or decimal token in ASCII digits.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\.?[0-9]*\b").unwrap());

/// All numeric tokens in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Everything the heuristic extractors found in a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifacts {
    pub tables: Vec<Table>,
    pub heatmap: Option<HeatmapChart>,
    pub flow: Option<SankeyChart>,
}

/// Run every extractor over `text`.
pub fn inspect(text: &str) -> Artifacts {
    Artifacts {
        tables: extract_tables(text),
        heatmap: heatmap_chart(text),
        flow: flow_chart(text),
    }
}
