//! PDF text extraction via lopdf.

use lopdf::Document;

use super::ExtractionError;

/// Concatenate the text of every page, each followed by a newline.
pub(super) fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_number, e)))?;
        text.push_str(&page_text);
        text.push('\n');
    }
    Ok(text)
}
