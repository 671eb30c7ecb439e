//! Paged collection iteration
//!
//! The core of the crate: a lazy, forward-only walk over a collection
//! endpoint that fetches one page at a time as the consumer drains it.
//!
//! # Overview
//!
//! A [`PagedCollection`] owns the cursor for one logical query. Each call to
//! `next` returns one typed resource, fetching the next page from the server
//! only when the current page runs out. The API family mixes two pagination
//! styles in the same response slot, distinguished purely by shape:
//!
//! - **offset/URL-style**: `pages.next` is a URL string pointing at the next
//!   page,
//! - **cursor-style**: `pages.next` is an object carrying a `starting_after`
//!   token.

mod collection;
mod link;
mod types;

pub use collection::PagedCollection;
pub use link::next_link;
pub use types::{NextCursor, PageMeta};

#[cfg(test)]
mod tests;
