//! docboard - turn uploaded documents into structured dashboard descriptions.
//!
//! The pipeline reads a document (plain text, PDF, or DOCX), picks one
//! analysis strategy at startup, and produces either a canonical
//! [`models::Dashboard`] or an opaque standalone HTML document.
//!
//! The rule-based analyzer is the universal fallback: every AI-backed path
//! degrades to it on any failure, so callers always receive a renderable
//! result.

pub mod analysis;
pub mod config;
pub mod extract;
pub mod heuristics;
pub mod llm;
pub mod models;
pub mod utils;

pub use analysis::{AnalysisOptions, ChatResponse, Orchestrator, SummaryLength};
pub use config::Config;
pub use models::{AnalysisOutput, Dashboard};
