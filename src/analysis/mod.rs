//! Document analysis pipeline.
//!
//! An [`Orchestrator`] holds exactly one [`Strategy`], picked at startup:
//!
//! - [`RuleBasedAnalyzer`]: deterministic, needs no external service
//! - [`CustomHtmlAnalyzer`]: asks a generation service for a standalone HTML page
//! - [`StructuredAnalyzer`]: asks a generation service for dashboard JSON
//!
//! Both AI-backed strategies fall back to the rule-based analyzer on any
//! failure, so analysis always yields a renderable result.

mod chat;
mod custom_html;
mod options;
mod orchestrator;
mod prompts;
mod rules;
mod strategy;
mod structured;

#[cfg(test)]
mod testing;

pub use chat::{ChatResponse, DocumentChat, CHAT_UNAVAILABLE, EMPTY_QUESTION};
pub use custom_html::CustomHtmlAnalyzer;
pub use options::{AnalysisOptions, CallLimits, SummaryLength};
pub use orchestrator::{Orchestrator, DEFAULT_MIN_TEXT_LENGTH, INSUFFICIENT_CONTENT};
pub use rules::{RuleBasedAnalyzer, DEFAULT_TITLE};
pub use strategy::Strategy;
pub use structured::{parse_dashboard, SchemaError, StructuredAnalyzer};
