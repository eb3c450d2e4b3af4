//! Data models for docboard.

mod artifact;
mod chart;
mod dashboard;

pub use artifact::{AnalysisOutput, CustomHtmlArtifact};
pub use chart::{
    Chart, ChartType, Dataset, HeatmapChart, Provenance, SankeyChart, SankeyLinks, SankeyNodes,
    SeriesChart,
};
pub use dashboard::{Dashboard, Layout, Section, UiTheme};
