//! Search engine result page parsing
//!
//! Reads the DuckDuckGo HTML results layout: one `.result` block per hit,
//! the title link in `a.result__a`, the excerpt in `.result__snippet`.

use super::{collapse_whitespace, selector};
use crate::types::SearchResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const RESULT_BLOCK: &str = ".result";
const RESULT_LINK: &str = "a.result__a";
const RESULT_SNIPPET: &str = ".result__snippet";

/// Class marking sponsored blocks
const AD_CLASS: &str = "result--ad";

/// Query parameter carrying the real target of a redirect link
const REDIRECT_PARAM: &str = "uddg";

/// Extract up to `limit` results from a results page, in document order
///
/// Relative links are resolved against `base` (the results page URL).
/// Blocks without a usable link or title are skipped.
pub fn extract_search_results(doc: &Html, base: &Url, limit: usize) -> Vec<SearchResult> {
    let (Some(block_sel), Some(link_sel), Some(snippet_sel)) = (
        selector(RESULT_BLOCK),
        selector(RESULT_LINK),
        selector(RESULT_SNIPPET),
    ) else {
        return Vec::new();
    };

    doc.select(&block_sel)
        .filter(|block| !block.value().classes().any(|class| class == AD_CLASS))
        .filter_map(|block| read_block(block, base, &link_sel, &snippet_sel))
        .take(limit)
        .collect()
}

fn read_block(
    block: ElementRef<'_>,
    base: &Url,
    link_sel: &Selector,
    snippet_sel: &Selector,
) -> Option<SearchResult> {
    let link = block.select(link_sel).next()?;

    let title = collapse_whitespace(&link.text().collect::<String>());
    if title.is_empty() {
        return None;
    }

    let url = resolve_link(link.value().attr("href")?, base)?;

    let snippet = block
        .select(snippet_sel)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    Some(SearchResult {
        title,
        url,
        snippet,
    })
}

/// Turn a result `href` into an absolute HTTP(S) URL
///
/// Redirect links such as `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com`
/// resolve to their decoded target.
fn resolve_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut url = base.join(href).ok()?;

    let target = url
        .query_pairs()
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned());
    if let Some(target) = target {
        url = Url::parse(&target).ok()?;
    }

    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
