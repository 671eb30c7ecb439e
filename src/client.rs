//! Client facade
//!
//! Ties the transport and the paging layer together: a [`Client`] hands out
//! one [`PagedCollection`] per logical query.

use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::paging::PagedCollection;
use crate::resource::FromFields;
use crate::types::StringMap;
use std::sync::Arc;

/// Entry point for paginated collection endpoints.
///
/// ```rust,ignore
/// let client = Client::new(
///     HttpClientConfig::builder()
///         .base_url("https://api.example.com")
///         .bearer_token(token)
///         .build(),
/// );
///
/// let mut contacts = client.collection::<Contact>("/contacts");
/// while let Some(contact) = contacts.next().await? {
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client with an HTTP transport built from `config`.
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            transport: Arc::new(HttpClient::with_config(config)),
        }
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Start a paginated walk over a collection endpoint.
    ///
    /// Each call produces a fresh, independent cursor; a collection is not
    /// reusable once exhausted.
    pub fn collection<T: FromFields>(&self, path: impl Into<String>) -> PagedCollection<T> {
        PagedCollection::new(self.transport.clone(), path)
    }

    /// Start a paginated walk with filter parameters.
    ///
    /// The parameters are sent with every page fetch for this query.
    pub fn collection_with_params<T: FromFields>(
        &self,
        path: impl Into<String>,
        params: StringMap,
    ) -> PagedCollection<T> {
        PagedCollection::with_params(self.transport.clone(), path, params)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
