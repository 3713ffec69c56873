//! Link preview metadata
//!
//! Each field is filled from an ordered list of sources; the first source
//! with a non-empty value wins and later sources are never consulted:
//!
//! | Field        | Sources                                               |
//! |--------------|-------------------------------------------------------|
//! | content_type | `content-type` response header                        |
//! | language     | `lang` on `<html>`                                    |
//! | title        | `og:title`, `twitter:title`, `<title>`                |
//! | description  | `og:description`, `twitter:description`, `description` |
//! | image        | `og:image`, `twitter:image`                           |
//! | site_name    | `og:site_name`                                        |
//! | kind         | `og:type`                                             |
//! | url_canonical| `og:url`                                              |
//! | twitter_card | `twitter:card`                                        |

use super::{non_empty, selector};
use crate::types::LinkPreview;
use scraper::{ElementRef, Html};

/// OpenGraph values, first non-empty occurrence of each property
#[derive(Debug, Default)]
struct OpenGraph {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    site_name: Option<String>,
    kind: Option<String>,
    url: Option<String>,
}

impl OpenGraph {
    fn scan(doc: &Html) -> Self {
        let mut og = Self::default();
        let Some(sel) = selector(r#"meta[property^="og:"]"#) else {
            return og;
        };

        for el in doc.select(&sel) {
            let Some(property) = el.value().attr("property") else {
                continue;
            };
            let slot = match property {
                "og:title" => &mut og.title,
                "og:description" => &mut og.description,
                "og:image" => &mut og.image,
                "og:site_name" => &mut og.site_name,
                "og:type" => &mut og.kind,
                "og:url" => &mut og.url,
                _ => continue,
            };
            if slot.is_none() {
                *slot = meta_content(el);
            }
        }
        og
    }
}

/// Twitter Card values, first non-empty occurrence of each name
#[derive(Debug, Default)]
struct TwitterCard {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    card: Option<String>,
}

impl TwitterCard {
    fn scan(doc: &Html) -> Self {
        let mut tw = Self::default();
        let Some(sel) = selector(r#"meta[name^="twitter:"]"#) else {
            return tw;
        };

        for el in doc.select(&sel) {
            let Some(name) = el.value().attr("name") else {
                continue;
            };
            let slot = match name {
                "twitter:title" => &mut tw.title,
                "twitter:description" => &mut tw.description,
                "twitter:image" => &mut tw.image,
                "twitter:card" => &mut tw.card,
                _ => continue,
            };
            if slot.is_none() {
                *slot = meta_content(el);
            }
        }
        tw
    }
}

fn meta_content(el: ElementRef<'_>) -> Option<String> {
    el.value().attr("content").and_then(non_empty)
}

fn document_title(doc: &Html) -> Option<String> {
    let sel = selector("title")?;
    let el = doc.select(&sel).next()?;
    non_empty(&el.text().collect::<String>())
}

fn meta_description(doc: &Html) -> Option<String> {
    let sel = selector(r#"meta[name="description"]"#)?;
    doc.select(&sel).find_map(meta_content)
}

fn document_language(doc: &Html) -> Option<String> {
    doc.root_element().value().attr("lang").and_then(non_empty)
}

/// Build the preview record for a parsed page
///
/// `content_type` is the page's Content-Type response header, if any.
/// The favicon is not part of the document and is left unset.
pub fn extract_preview(doc: &Html, url: &str, content_type: Option<&str>) -> LinkPreview {
    let og = OpenGraph::scan(doc);
    let tw = TwitterCard::scan(doc);

    LinkPreview {
        url: url.to_string(),
        content_type: content_type.and_then(non_empty),
        language: document_language(doc),
        title: og
            .title
            .or(tw.title)
            .or_else(|| document_title(doc)),
        description: og
            .description
            .or(tw.description)
            .or_else(|| meta_description(doc)),
        image: og.image.or(tw.image),
        site_name: og.site_name,
        kind: og.kind,
        url_canonical: og.url,
        twitter_card: tw.card,
        favicon: None,
    }
}
