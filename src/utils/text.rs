//! Text helpers shared by the analyzers.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```\s*").unwrap());
static TRAILING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*```$").unwrap());

/// Return at most `max_chars` characters of `text` (UTF-8 safe).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Strip a Markdown code fence wrapped around a model response.
///
/// Removes a leading ```` ```{lang} ```` or bare ```` ``` ```` opener and a
/// trailing ```` ``` ```` closer. Text without fences is returned trimmed.
pub fn strip_code_fences(response: &str, lang: &str) -> String {
    let mut cleaned = response.trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        if let Some(after_lang) = rest.strip_prefix(lang) {
            cleaned = after_lang.trim_start();
        }
    }
    let cleaned = LEADING_FENCE.replace(cleaned, "");
    TRAILING_FENCE.replace(&cleaned, "").into_owned()
}
