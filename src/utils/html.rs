//! HTML escaping and markup safety checks.

use regex::Regex;
use std::sync::LazyLock;

/// Markup that must never appear in a dashboard fragment.
static DISALLOWED_MARKUP: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)<\s*script\b").unwrap(), "script tag"),
        (Regex::new(r"(?i)<\s*style\b").unwrap(), "style tag"),
        (Regex::new(r"(?i)<\s*link\b").unwrap(), "link tag"),
        (Regex::new(r"(?i)<\s*iframe\b").unwrap(), "iframe tag"),
        (Regex::new(r"(?i)<\s*(html|head|body)\b").unwrap(), "document-level tag"),
        (Regex::new(r#"(?i)<[^>]*\sstyle\s*="#).unwrap(), "inline style"),
        (Regex::new(r#"(?i)<[^>]*\sclass\s*="#).unwrap(), "class attribute"),
        (Regex::new(r#"(?i)<[^>]*\son[a-z]+\s*="#).unwrap(), "event handler"),
    ]
});

/// Escape HTML special characters for safe rendering.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Return a description of the first disallowed construct in `fragment`, if any.
pub fn find_disallowed_markup(fragment: &str) -> Option<&'static str> {
    DISALLOWED_MARKUP
        .iter()
        .find(|(pattern, _)| pattern.is_match(fragment))
        .map(|(_, what)| *what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic() {
        assert_eq!(html_escape("hello"), "hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_semantic_fragment_allowed() {
        let fragment = "<section><h2>Results</h2><p>Growth was <strong>12%</strong>.</p>\
                        <ul><li>one</li></ul><table><tr><td>1</td></tr></table></section>";
        assert_eq!(find_disallowed_markup(fragment), None);
    }

    #[test]
    fn test_disallowed_markup_detected() {
        assert_eq!(
            find_disallowed_markup("<p>x</p><SCRIPT>alert(1)</SCRIPT>"),
            Some("script tag")
        );
        assert_eq!(
            find_disallowed_markup("<p class=\"text-lg\">x</p>"),
            Some("class attribute")
        );
        assert_eq!(
            find_disallowed_markup("<p style=\"color:red\">x</p>"),
            Some("inline style")
        );
        assert_eq!(
            find_disallowed_markup("<p onclick=\"go()\">x</p>"),
            Some("event handler")
        );
        assert_eq!(
            find_disallowed_markup("<link rel=\"stylesheet\" href=\"x.css\">"),
            Some("link tag")
        );
    }

    #[test]
    fn test_attribute_words_in_prose_allowed() {
        assert_eq!(find_disallowed_markup("<p>each class = 30 pupils</p>"), None);
        assert_eq!(
            find_disallowed_markup("<p>the style = formal, turn on = 5</p>"),
            None
        );
        assert_eq!(
            find_disallowed_markup("<td data-x=\"1\" class=\"big\">x</td>"),
            Some("class attribute")
        );
    }

    #[test]
    fn test_escaped_markup_is_safe() {
        let escaped = html_escape("<script>alert('x')</script>");
        assert_eq!(find_disallowed_markup(&escaped), None);
    }
}
