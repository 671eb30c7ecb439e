//! Next-link extraction
//!
//! Pure computation of the next request link from a page response and the
//! URL the page was fetched with.

use super::types::{NextCursor, PageMeta};
use crate::types::JsonValue;
use url::Url;

/// Base used to resolve relative links; the scheme and host are discarded
/// from every computed link, so the placeholder never leaks out.
const RELATIVE_BASE: &str = "https://relative.invalid/";

/// Compute the link for the page after `body`, or `None` when `body` is the
/// last (or only) page.
///
/// Offset/URL-style `pages.next` values are reduced to path + query, with
/// scheme and host stripped: the client always talks to the same host, and
/// keeping links relative lets the transport's base URL apply. Cursor-style
/// values keep the path of the request that produced `body` and advance the
/// `starting_after` token.
pub fn next_link(current_url: &str, body: &JsonValue) -> Option<String> {
    let meta = PageMeta::from_body(body)?;

    match meta.next? {
        NextCursor::Url(next) => path_and_query(&next),
        NextCursor::StartingAfter { starting_after } => {
            let path = path_of(current_url)?;
            Some(format!("{path}?starting_after={starting_after}"))
        }
    }
}

/// Reduce an absolute or relative URL to its path plus query string.
fn path_and_query(raw: &str) -> Option<String> {
    let parsed = parse_relaxed(raw)?;
    match parsed.query() {
        Some(query) if !query.is_empty() => Some(format!("{}?{}", parsed.path(), query)),
        _ => Some(parsed.path().to_string()),
    }
}

/// Reduce an absolute or relative URL to its path, dropping any query.
fn path_of(raw: &str) -> Option<String> {
    parse_relaxed(raw).map(|u| u.path().to_string())
}

/// Parse a URL that may be absolute or relative.
fn parse_relaxed(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).ok()?.join(raw).ok()
        }
        Err(_) => None,
    }
}
