//! Pure extractors over parsed HTML
//!
//! Extractors never fail: a field that cannot be found is simply absent.
//! They take a parsed [`Html`] document, which is `!Send`, so callers parse
//! and extract between awaits rather than across them.

mod content;
mod preview;
mod search;

pub use content::extract_content;
pub use preview::extract_preview;
pub use search::extract_search_results;

pub use scraper::Html;

use scraper::Selector;

/// Compile a selector, `None` if it is not valid CSS
pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(css, error = ?e, "Invalid selector");
            None
        }
    }
}

/// Collapse runs of whitespace (newlines included) to one space and trim
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed value, `None` when empty
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
