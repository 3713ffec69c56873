//! Best-effort favicon discovery
//!
//! The probe has no error channel: a missing icon is not a failure of the
//! preview it decorates.

use crate::client::BoundedFetcher;
use tracing::debug;
use url::Url;

/// Default icon location for the origin of `page_url`
///
/// Path, query and fragment of the page are ignored. Returns `None` for
/// URLs without an HTTP(S) origin.
pub fn favicon_candidate(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(format!("{}/favicon.ico", origin.ascii_serialization()))
}

/// Return the favicon URL if the origin serves one
pub async fn probe_favicon(fetcher: &BoundedFetcher, page_url: &str) -> Option<String> {
    let candidate = favicon_candidate(page_url)?;

    match fetcher
        .fetch(&candidate, fetcher.options().favicon_timeout)
        .await
    {
        Ok(page) if page.status_ok => Some(candidate),
        Ok(page) => {
            debug!(url = %candidate, status = page.status, "No favicon");
            None
        }
        Err(e) => {
            debug!(url = %candidate, error = %e, "Favicon probe failed");
            None
        }
    }
}
