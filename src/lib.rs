//! # rest-pager
//!
//! A lazy paginated collection client for REST APIs that mix pagination
//! styles. Given a starting query, a [`PagedCollection`] yields typed domain
//! objects one at a time, transparently fetching successive pages as the
//! consumer exhausts each page, without materializing the whole result set.
//!
//! ## Features
//!
//! - **Lazy paging**: at most one page in memory, at most one request per
//!   page boundary, no requests at all if the consumer stops early
//! - **Dual pagination styles**: offset/URL-style and cursor-style
//!   (`starting_after`) links, dispatched by response shape
//! - **Typed resources**: any `serde`-deserializable type works as a domain
//!   object via the [`FromFields`] seam
//! - **Robust transport**: retries with backoff and token-bucket rate
//!   limiting, kept out of the iterator entirely
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rest_pager::{Client, HttpClientConfig, Result};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Contact {
//!     id: String,
//!     email: Option<String>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com")
//!             .bearer_token("tok_...")
//!             .build(),
//!     );
//!
//!     let mut contacts = client.collection::<Contact>("/contacts");
//!     while let Some(contact) = contacts.next().await? {
//!         println!("{}", contact.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Domain resource construction
pub mod resource;

/// Paged collection iteration
pub mod paging;

/// Client facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, Transport};
pub use paging::{next_link, NextCursor, PagedCollection, PageMeta};
pub use resource::{collection_name, FromFields};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
