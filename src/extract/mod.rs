//! Text extraction from uploaded documents.
//!
//! Converts a source document into plain text by format:
//! - `txt`: read directly, undecodable bytes dropped
//! - `pdf`: per-page text via lopdf, pages joined with newlines
//! - `docx` / `doc`: top-level body paragraphs from the OOXML package
//!
//! Failures are reported as [`ExtractionError`] rather than as text, so a
//! failure message can never be mistaken for document content.

mod docx;
mod extractor;
mod pdf;

pub use extractor::{DocumentFormat, ExtractionError, TextExtractor};
