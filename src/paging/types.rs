//! Page metadata types
//!
//! Defines the decoded shape of a page response's pagination metadata and
//! the internal iteration state machine.

use crate::types::JsonValue;
use serde::Deserialize;
use tracing::warn;

/// Reference to the next page, decoded from `pages.next`.
///
/// The server signals the next page in one of two shapes and nothing but the
/// runtime shape tells them apart: a bare string is offset/URL-style, an
/// object is cursor-style. The untagged decode preserves that dispatch while
/// letting callers match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NextCursor {
    /// Offset/URL-style: a full or relative URL for the next page
    Url(String),
    /// Cursor-style: an opaque token to resume after
    StartingAfter {
        /// The cursor token
        starting_after: String,
    },
}

/// Pagination metadata carried under a page response's `pages` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// The next-page reference, if any
    pub next: Option<NextCursor>,
}

impl PageMeta {
    /// Decode the pagination metadata from a page body.
    ///
    /// Metadata only counts as present when the `pages` object also carries
    /// a `type` field; a response without both is a single-page result. A
    /// `pages.next` that is neither a string nor a cursor object is treated
    /// as absent.
    pub fn from_body(body: &JsonValue) -> Option<Self> {
        let pages = body.get("pages")?;
        pages.get("type")?;

        let next = match pages.get("next") {
            None | Some(JsonValue::Null) => None,
            Some(value) => match serde_json::from_value::<NextCursor>(value.clone()) {
                Ok(cursor) => Some(cursor),
                Err(_) => {
                    warn!("unrecognized pages.next shape, treating as last page: {value}");
                    None
                }
            },
        };

        Some(Self { next })
    }
}

/// Iteration state of a [`super::PagedCollection`].
///
/// `NotStarted` until the first fetch, `Loaded` while a page's items are
/// being drained, `Exhausted` once end-of-sequence has been signalled.
/// Exhaustion is sticky: the machine never leaves that state.
#[derive(Debug)]
pub(crate) enum PageState {
    /// No page has been fetched yet
    NotStarted,
    /// A page is loaded; `items` holds the not-yet-consumed raw items
    Loaded {
        /// Remaining raw items of the current page
        items: std::vec::IntoIter<JsonValue>,
    },
    /// End-of-sequence has been signalled
    Exhausted,
}
