//! The paged collection iterator

use super::link::next_link;
use super::types::PageState;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::resource::{collection_name, FromFields};
use crate::types::{JsonValue, StringMap, EMPTY_PARAMS};
use futures::stream::Stream;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};

/// A lazy, forward-only, non-restartable sequence of typed resources.
///
/// One instance covers one logical query (e.g. "all contacts matching
/// filter X"). Pages are fetched on demand, at most one network round-trip
/// per page boundary, and at most one page is held in memory. Once
/// end-of-sequence has been signalled the collection stays exhausted; it is
/// not reusable for a second query.
///
/// ```rust,ignore
/// let mut contacts: PagedCollection<Contact> =
///     client.collection("/contacts");
/// while let Some(contact) = contacts.next().await? {
///     println!("{}", contact.id);
/// }
/// ```
pub struct PagedCollection<T> {
    transport: Arc<dyn Transport>,
    /// Collection name of the resource kind being produced
    resource_kind: String,
    /// Key the raw item list is nested under in page responses
    collection_key: String,
    /// The starting request
    finder_url: String,
    finder_params: StringMap,
    /// Iteration state; owns the current page's remaining items
    state: PageState,
    /// Link to the page after the current one, recomputed on every fetch
    next_page: Option<String>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: FromFields> PagedCollection<T> {
    /// Create a collection for the given starting request.
    ///
    /// The collection key defaults to the name derived from `T`
    /// (`Contact` → `contacts`); use [`with_collection_key`] when the
    /// response nests items under something else.
    ///
    /// [`with_collection_key`]: Self::with_collection_key
    pub fn new(transport: Arc<dyn Transport>, finder_url: impl Into<String>) -> Self {
        Self::with_params(transport, finder_url, EMPTY_PARAMS.clone())
    }

    /// Create a collection with query parameters for the starting request.
    ///
    /// The parameters are sent with every page fetch, alongside whatever
    /// query the next-page link itself carries.
    pub fn with_params(
        transport: Arc<dyn Transport>,
        finder_url: impl Into<String>,
        finder_params: StringMap,
    ) -> Self {
        let resource_kind = collection_name::<T>();
        Self {
            transport,
            collection_key: resource_kind.clone(),
            resource_kind,
            finder_url: finder_url.into(),
            finder_params,
            state: PageState::NotStarted,
            next_page: None,
            _resource: PhantomData,
        }
    }

    /// Override the key the raw item list is nested under.
    #[must_use]
    pub fn with_collection_key(mut self, key: impl Into<String>) -> Self {
        self.collection_key = key.into();
        self
    }

    /// Collection name of the resource kind this instance produces.
    pub fn resource_kind(&self) -> &str {
        &self.resource_kind
    }

    /// Pull the next resource, fetching a page if needed.
    ///
    /// Returns `Ok(None)` at end-of-sequence. Transport failures and
    /// malformed pages surface as errors from the call that triggered the
    /// fetch; the iterator does not retry.
    pub async fn next(&mut self) -> Result<Option<T>> {
        match self.state {
            PageState::Exhausted => return Ok(None),
            PageState::NotStarted => {
                let url = self.finder_url.clone();
                if !self.fetch_page(Some(url.as_str())).await? {
                    self.state = PageState::Exhausted;
                    return Ok(None);
                }
            }
            PageState::Loaded { .. } => {}
        }

        let raw = match self.draw() {
            Some(item) => item,
            None => {
                // Current page is drained; fetch the successor exactly once.
                let link = self.next_page.take();
                if !self.fetch_page(link.as_deref()).await? {
                    self.state = PageState::Exhausted;
                    return Ok(None);
                }
                match self.draw() {
                    Some(item) => item,
                    None => {
                        // A fresh page with no items ends the sequence.
                        self.state = PageState::Exhausted;
                        return Ok(None);
                    }
                }
            }
        };

        self.build_resource(raw).map(Some)
    }

    /// Consume and discard `index` resources, then return the next one.
    ///
    /// A stateful convenience built strictly on [`next`]: each call resumes
    /// from wherever iteration last left off, so `at(0)` after `at(3)`
    /// returns the fifth resource. An index beyond the end yields
    /// `Ok(None)`.
    ///
    /// [`next`]: Self::next
    pub async fn at(&mut self, index: usize) -> Result<Option<T>> {
        for _ in 0..index {
            if self.next().await?.is_none() {
                return Ok(None);
            }
        }
        self.next().await
    }

    /// Drain the remaining resources into a vector.
    pub async fn collect_remaining(&mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while let Some(item) = self.next().await? {
            out.push(item);
        }
        Ok(out)
    }

    /// Adapt the collection into a [`Stream`] of resources.
    ///
    /// The stream polls [`next`] one item at a time; no prefetching. After
    /// yielding an error the stream ends on the following poll.
    ///
    /// [`next`]: Self::next
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send
    where
        T: Send + 'static,
    {
        futures::stream::unfold(self, |mut collection| async move {
            match collection.next().await {
                Ok(Some(item)) => Some((Ok(item), collection)),
                Ok(None) => None,
                Err(err) => Some((Err(err), collection)),
            }
        })
    }

    /// Fetch one page and load its items.
    ///
    /// Returns `Ok(true)` when a page was loaded and `Ok(false)` for the
    /// normal termination conditions: no link to follow, or a present but
    /// null item list.
    async fn fetch_page(&mut self, url: Option<&str>) -> Result<bool> {
        let Some(url) = url else {
            return Ok(false);
        };

        debug!(kind = %self.resource_kind, url, "fetching page");

        let mut body = self
            .transport
            .get(url, &self.finder_params)
            .await?
            .ok_or(Error::EmptyResponse)?;

        let list = match body.as_object_mut() {
            Some(obj) if obj.contains_key(&self.collection_key) => {
                obj.remove(&self.collection_key)
            }
            Some(obj) => obj.remove("data"),
            None => None,
        };

        let Some(list) = list else {
            return Err(Error::missing_collection(&self.collection_key));
        };

        let items = match list {
            JsonValue::Null => return Ok(false),
            JsonValue::Array(items) => items,
            other => {
                return Err(Error::decode(format!(
                    "expected an array under '{}', got {other}",
                    self.collection_key
                )))
            }
        };

        trace!(
            kind = %self.resource_kind,
            count = items.len(),
            "page loaded"
        );

        self.state = PageState::Loaded {
            items: items.into_iter(),
        };
        self.next_page = next_link(url, &body);

        Ok(true)
    }

    /// Draw one raw item from the current page, if any remain.
    fn draw(&mut self) -> Option<JsonValue> {
        match &mut self.state {
            PageState::Loaded { items } => items.next(),
            _ => None,
        }
    }

    /// Construct the typed resource from a raw item.
    fn build_resource(&self, raw: JsonValue) -> Result<T> {
        match raw {
            JsonValue::Object(fields) => T::from_fields(fields),
            other => Err(Error::decode(format!(
                "expected a '{}' item object, got {other}",
                self.resource_kind
            ))),
        }
    }
}

impl<T> std::fmt::Debug for PagedCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollection")
            .field("resource_kind", &self.resource_kind)
            .field("collection_key", &self.collection_key)
            .field("finder_url", &self.finder_url)
            .field("state", &self.state)
            .field("next_page", &self.next_page)
            .finish_non_exhaustive()
    }
}
