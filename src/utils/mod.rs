//! Shared utility functions.
//!
//! - `html`: HTML escaping and markup safety checks
//! - `text`: char-safe truncation and code-fence stripping

mod html;
mod text;

pub use html::{find_disallowed_markup, html_escape};
pub use text::{strip_code_fences, truncate_chars};
