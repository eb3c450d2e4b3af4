//! Format dispatch for text extraction.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use super::{docx, pdf};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error extracting PDF: {0}")]
    Pdf(String),

    #[error("Error extracting DOCX: {0}")]
    Docx(String),
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
    /// Legacy Word; read through the DOCX path.
    Doc,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Txt),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Best-effort plain-text extractor.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a file, detecting the format from its extension.
    ///
    /// Unknown extensions yield empty text.
    pub fn extract_path(&self, path: &Path) -> Result<String, ExtractionError> {
        let Some(format) = DocumentFormat::from_path(path) else {
            debug!("No extractor for {}", path.display());
            return Ok(String::new());
        };
        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes, format)
    }

    /// Extract text from an in-memory document of a known format.
    pub fn extract_bytes(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<String, ExtractionError> {
        let result = match format {
            DocumentFormat::Txt => Ok(decode_ignoring_errors(bytes)),
            DocumentFormat::Pdf => pdf::extract_text(bytes),
            DocumentFormat::Docx | DocumentFormat::Doc => docx::extract_text(bytes),
        };

        match &result {
            Ok(text) => debug!("Extracted {} chars from {} document", text.len(), format),
            Err(e) => warn!("Text extraction failed for {} document: {}", format, e),
        }
        result
    }
}

/// Decode UTF-8, dropping undecodable bytes.
fn decode_ignoring_errors(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("report.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")),
            Some(DocumentFormat::Txt)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("old.doc")),
            Some(DocumentFormat::Doc)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("image.png")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_txt_drops_invalid_bytes() {
        let extractor = TextExtractor::new();
        let bytes = b"caf\xc3\xa9 \xff\xfeok";
        let text = extractor.extract_bytes(bytes, DocumentFormat::Txt).unwrap();
        assert_eq!(text, "café ok");
    }

    #[test]
    fn test_extract_txt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"First line\nSecond line\n").unwrap();

        let text = TextExtractor::new().extract_path(&path).unwrap();
        assert_eq!(text, "First line\nSecond line\n");
    }

    #[test]
    fn test_unknown_extension_yields_empty_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b,c").unwrap();

        let text = TextExtractor::new().extract_path(&path).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TextExtractor::new().extract_path(Path::new("/nonexistent/doc.txt"));
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_corrupt_pdf_reports_failure() {
        let result = TextExtractor::new().extract_bytes(b"not a pdf", DocumentFormat::Pdf);
        match result {
            Err(e @ ExtractionError::Pdf(_)) => {
                assert!(e.to_string().starts_with("Error extracting PDF"))
            }
            other => panic!("expected PDF failure, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_doc_reports_docx_failure() {
        let result =
            TextExtractor::new().extract_bytes(b"\xd0\xcf\x11\xe0binary", DocumentFormat::Doc);
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }
}
