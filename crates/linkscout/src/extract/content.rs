//! Readable text extraction
//!
//! Boilerplate elements are detached from a copy of the document first, so
//! none of their text can leak into the result. Text is then taken from the
//! first non-empty `<article>`, `<main>` or `<body>`, whitespace-collapsed and
//! cut to the requested number of characters.

use super::{collapse_whitespace, selector};
use crate::types::ContentDigest;
use scraper::{ElementRef, Html, Node};

/// Elements that never carry primary content
const BOILERPLATE: &str =
    "script, style, nav, header, footer, iframe, noscript, aside, form, button, svg";

/// Content roots, in priority order
const CONTENT_ROOTS: &[&str] = &["article", "main", "body"];

/// Elements whose boundaries separate words
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "dl", "dt",
    "dd", "tr", "td", "th", "table", "article", "section", "main", "blockquote", "pre",
    "figure", "figcaption", "details", "summary", "address",
];

/// Extract the readable text of `doc`, at most `max_length` characters
pub fn extract_content(doc: &Html, max_length: usize) -> ContentDigest {
    let mut doc = doc.clone();
    strip_boilerplate(&mut doc);

    let text = CONTENT_ROOTS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| {
            let el = doc.root_element().select(&sel).next()?;
            let text = element_text(el);
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_default();

    ContentDigest {
        text: truncate_chars(&text, max_length),
        max_length,
    }
}

fn strip_boilerplate(doc: &mut Html) {
    let Some(sel) = selector(BOILERPLATE) else {
        return;
    };
    let ids: Vec<_> = doc.select(&sel).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect_text(el, &mut buf);
    collapse_whitespace(&buf)
}

fn collect_text(el: ElementRef<'_>, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(element) => {
                let is_block = BLOCK_TAGS.contains(&element.name());
                if is_block {
                    buf.push(' ');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, buf);
                }
                if is_block {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Hard cut after `max` characters
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
