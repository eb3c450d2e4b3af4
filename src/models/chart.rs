//! Chart descriptors attached to dashboard sections.

use serde::{Deserialize, Serialize};

/// Where the numbers in a chart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Values taken from the source document.
    #[default]
    Extracted,
    /// Structural placeholder; not faithful to the document.
    Illustrative,
}

impl Provenance {
    fn is_extracted(&self) -> bool {
        *self == Provenance::Extracted
    }
}

/// A single numeric series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Labeled series chart (line, bar, pie, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Square value matrix with axis labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub z: Vec<Vec<f64>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    #[serde(default = "default_colorscale")]
    pub colorscale: String,
    #[serde(default, skip_serializing_if = "Provenance::is_extracted")]
    pub provenance: Provenance,
}

fn default_colorscale() -> String {
    "Viridis".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNodes {
    pub label: Vec<String>,
    #[serde(default)]
    pub color: Vec<String>,
}

/// Directed weighted edges as parallel index arrays into the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLinks {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyChart {
    pub node: SankeyNodes,
    pub link: SankeyLinks,
    #[serde(default, skip_serializing_if = "Provenance::is_extracted")]
    pub provenance: Provenance,
}

/// A typed visualization descriptor. Serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Chart {
    Line(SeriesChart),
    Bar(SeriesChart),
    Pie(SeriesChart),
    Doughnut(SeriesChart),
    Radar(SeriesChart),
    Scatter(SeriesChart),
    Bubble(SeriesChart),
    Heatmap(HeatmapChart),
    Sankey(SankeyChart),
}

/// Chart kind without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
    Scatter,
    Bubble,
    Heatmap,
    Sankey,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Radar => "radar",
            ChartType::Scatter => "scatter",
            ChartType::Bubble => "bubble",
            ChartType::Heatmap => "heatmap",
            ChartType::Sankey => "sankey",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Chart {
    /// Bar chart with a single dataset.
    pub fn bar(labels: Vec<String>, dataset: Dataset) -> Self {
        Chart::Bar(SeriesChart {
            labels,
            datasets: vec![dataset],
        })
    }

    pub fn chart_type(&self) -> ChartType {
        match self {
            Chart::Line(_) => ChartType::Line,
            Chart::Bar(_) => ChartType::Bar,
            Chart::Pie(_) => ChartType::Pie,
            Chart::Doughnut(_) => ChartType::Doughnut,
            Chart::Radar(_) => ChartType::Radar,
            Chart::Scatter(_) => ChartType::Scatter,
            Chart::Bubble(_) => ChartType::Bubble,
            Chart::Heatmap(_) => ChartType::Heatmap,
            Chart::Sankey(_) => ChartType::Sankey,
        }
    }

    /// Series payload for the standard chart types.
    pub fn series(&self) -> Option<&SeriesChart> {
        match self {
            Chart::Line(s)
            | Chart::Bar(s)
            | Chart::Pie(s)
            | Chart::Doughnut(s)
            | Chart::Radar(s)
            | Chart::Scatter(s)
            | Chart::Bubble(s) => Some(s),
            Chart::Heatmap(_) | Chart::Sankey(_) => None,
        }
    }

    /// Whether the chart is placeholder data rather than document values.
    pub fn is_illustrative(&self) -> bool {
        match self {
            Chart::Heatmap(h) => h.provenance == Provenance::Illustrative,
            Chart::Sankey(s) => s.provenance == Provenance::Illustrative,
            _ => false,
        }
    }
}
