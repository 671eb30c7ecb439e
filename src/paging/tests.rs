//! Tests for the paging module

use super::*;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// Next-link extraction
// ============================================================================

#[test_case(
    json!({"pages": {"type": "pages", "next": "https://host/contacts?page=2"}}),
    Some("/contacts?page=2");
    "absolute url is reduced to path and query"
)]
#[test_case(
    json!({"pages": {"type": "pages", "next": "https://host/contacts"}}),
    Some("/contacts");
    "absolute url without query keeps bare path"
)]
#[test_case(
    json!({"pages": {"type": "pages", "next": "/contacts?page=3&per_page=10"}}),
    Some("/contacts?page=3&per_page=10");
    "relative url passes through"
)]
#[test_case(
    json!({"pages": {"type": "pages", "next": null}}),
    None;
    "null next means last page"
)]
#[test_case(
    json!({"pages": {"type": "pages"}}),
    None;
    "absent next means last page"
)]
#[test_case(
    json!({"pages": {"next": "https://host/contacts?page=2"}}),
    None;
    "pages without type field is not pagination metadata"
)]
#[test_case(
    json!({"contacts": []}),
    None;
    "absent pages object means single page"
)]
#[test_case(
    json!({"pages": {"type": "pages", "next": {"unexpected": true}}}),
    None;
    "unrecognized next shape terminates"
)]
fn test_next_link_extraction(body: JsonValue, expected: Option<&str>) {
    assert_eq!(
        next_link("/contacts?per_page=10", &body),
        expected.map(String::from)
    );
}

#[test]
fn test_next_link_cursor_style() {
    let body = json!({"pages": {"type": "pages", "next": {"starting_after": "abc123"}}});
    assert_eq!(
        next_link("/contacts?per_page=10", &body),
        Some("/contacts?starting_after=abc123".to_string())
    );
}

#[test]
fn test_next_link_cursor_style_absolute_current_url() {
    let body = json!({"pages": {"type": "pages", "next": {"starting_after": "tok"}}});
    assert_eq!(
        next_link("https://api.example.com/companies?page=9", &body),
        Some("/companies?starting_after=tok".to_string())
    );
}

// ============================================================================
// PageMeta decode
// ============================================================================

#[test]
fn test_page_meta_string_next_decodes_as_url() {
    let body = json!({"pages": {"type": "pages", "next": "/contacts?page=2"}});
    let meta = PageMeta::from_body(&body).unwrap();
    assert_eq!(
        meta.next,
        Some(NextCursor::Url("/contacts?page=2".to_string()))
    );
}

#[test]
fn test_page_meta_object_next_decodes_as_cursor() {
    let body = json!({"pages": {"type": "pages", "next": {"starting_after": "abc"}}});
    let meta = PageMeta::from_body(&body).unwrap();
    assert_eq!(
        meta.next,
        Some(NextCursor::StartingAfter {
            starting_after: "abc".to_string()
        })
    );
}

#[test]
fn test_page_meta_absent_when_no_pages() {
    assert_eq!(PageMeta::from_body(&json!({"data": []})), None);
}

// ============================================================================
// PagedCollection state machine
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct Widget {
    id: u64,
}

/// Transport fed from a script of canned outcomes, recording every call.
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Option<JsonValue>>>>,
    calls: Mutex<Vec<(String, StringMap)>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<Option<JsonValue>>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, StringMap)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, params: &StringMap) -> Result<Option<JsonValue>> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted")
    }
}

fn page(ids: &[u64], next: JsonValue) -> JsonValue {
    let items: Vec<JsonValue> = ids.iter().map(|id| json!({"id": id})).collect();
    if next.is_null() {
        json!({"widgets": items})
    } else {
        json!({"widgets": items, "pages": {"type": "pages", "next": next}})
    }
}

#[tokio::test]
async fn test_empty_collection_yields_none_immediately() {
    let transport = ScriptedTransport::new(vec![Ok(Some(page(&[], JsonValue::Null)))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert!(widgets.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_single_page_iteration() {
    let transport = ScriptedTransport::new(vec![Ok(Some(page(&[1, 2], JsonValue::Null)))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 1 }));
    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 2 }));
    assert_eq!(widgets.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_multi_page_sequence_is_concatenation_in_order() {
    let transport = ScriptedTransport::new(vec![
        Ok(Some(page(&[1, 2], json!("/widgets?page=2")))),
        Ok(Some(page(&[3], json!("/widgets?page=3")))),
        Ok(Some(page(&[4, 5], JsonValue::Null))),
    ]);
    let mut widgets: PagedCollection<Widget> =
        PagedCollection::new(transport.clone(), "/widgets");

    let all = widgets.collect_remaining().await.unwrap();
    let ids: Vec<u64> = all.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let urls: Vec<String> = transport.calls().into_iter().map(|(u, _)| u).collect();
    assert_eq!(urls, vec!["/widgets", "/widgets?page=2", "/widgets?page=3"]);
}

#[tokio::test]
async fn test_cursor_pagination_advances_token() {
    let transport = ScriptedTransport::new(vec![
        Ok(Some(page(&[1], json!({"starting_after": "abc123"})))),
        Ok(Some(page(&[2], JsonValue::Null))),
    ]);
    let mut widgets: PagedCollection<Widget> =
        PagedCollection::new(transport.clone(), "/widgets?per_page=1");

    let all = widgets.collect_remaining().await.unwrap();
    assert_eq!(all.len(), 2);

    let urls: Vec<String> = transport.calls().into_iter().map(|(u, _)| u).collect();
    assert_eq!(
        urls,
        vec!["/widgets?per_page=1", "/widgets?starting_after=abc123"]
    );
}

#[tokio::test]
async fn test_finder_params_sent_on_every_fetch() {
    let mut params = StringMap::new();
    params.insert("tag".to_string(), "blue".to_string());

    let transport = ScriptedTransport::new(vec![
        Ok(Some(page(&[1], json!("/widgets?page=2")))),
        Ok(Some(page(&[2], JsonValue::Null))),
    ]);
    let mut widgets: PagedCollection<Widget> =
        PagedCollection::with_params(transport.clone(), "/widgets", params.clone());

    widgets.collect_remaining().await.unwrap();

    for (_, sent) in transport.calls() {
        assert_eq!(sent, params);
    }
}

#[tokio::test]
async fn test_named_key_takes_precedence_over_data() {
    let body = json!({
        "widgets": [{"id": 1}],
        "data": [{"id": 99}]
    });
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 1 }));
}

#[tokio::test]
async fn test_data_fallback_when_named_key_absent() {
    let body = json!({"data": [{"id": 7}]});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 7 }));
    assert_eq!(widgets.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_null_collection_is_end_of_sequence() {
    let body = json!({"widgets": null, "pages": {"type": "pages", "next": "/widgets?page=2"}});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert!(widgets.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_collection_keys_is_an_error() {
    let body = json!({"pages": {"type": "pages"}});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let err = widgets.next().await.unwrap_err();
    assert!(matches!(err, Error::MissingCollection { .. }));
}

#[tokio::test]
async fn test_empty_response_body_is_distinct_error() {
    let transport = ScriptedTransport::new(vec![Ok(None)]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let err = widgets.next().await.unwrap_err();
    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn test_transport_error_propagates_unmodified() {
    let transport = ScriptedTransport::new(vec![Err(Error::http_status(503, "down"))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let err = widgets.next().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_non_array_collection_value_is_decode_error() {
    let body = json!({"widgets": "oops"});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let err = widgets.next().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_non_object_item_is_decode_error() {
    let body = json!({"widgets": [42]});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let err = widgets.next().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_exhaustion_is_sticky() {
    let transport = ScriptedTransport::new(vec![Ok(Some(page(&[1], JsonValue::Null)))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert!(widgets.next().await.unwrap().is_some());
    assert!(widgets.next().await.unwrap().is_none());
    // No further transport calls happen after exhaustion; a scripted
    // transport would panic on an extra call.
    assert!(widgets.next().await.unwrap().is_none());
    assert!(widgets.at(3).await.unwrap().is_none());
}

#[tokio::test]
async fn test_at_is_a_stateful_cursor() {
    let transport = ScriptedTransport::new(vec![
        Ok(Some(page(&[1, 2, 3], json!("/widgets?page=2")))),
        Ok(Some(page(&[4, 5, 6], JsonValue::Null))),
    ]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    // at(3) skips three and returns the fourth, crossing a page boundary.
    assert_eq!(widgets.at(3).await.unwrap(), Some(Widget { id: 4 }));
    // at(0) resumes from where iteration left off: the fifth item.
    assert_eq!(widgets.at(0).await.unwrap(), Some(Widget { id: 5 }));
    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 6 }));
    assert_eq!(widgets.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_at_beyond_end_yields_none() {
    let transport = ScriptedTransport::new(vec![Ok(Some(page(&[1, 2], JsonValue::Null)))]);
    let mut widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    assert!(widgets.at(10).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetches_are_lazy() {
    let transport = ScriptedTransport::new(vec![Ok(Some(page(
        &[1, 2],
        json!("/widgets?page=2"),
    )))]);
    let mut widgets: PagedCollection<Widget> =
        PagedCollection::new(transport.clone(), "/widgets");

    // Construction does not fetch.
    assert!(transport.calls().is_empty());

    // Draining the first page does not fetch the second.
    widgets.next().await.unwrap();
    widgets.next().await.unwrap();
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_into_stream_yields_all_items() {
    let transport = ScriptedTransport::new(vec![
        Ok(Some(page(&[1, 2], json!("/widgets?page=2")))),
        Ok(Some(page(&[3], JsonValue::Null))),
    ]);
    let widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");

    let ids: Vec<u64> = widgets
        .into_stream()
        .map(|item| item.unwrap().id)
        .collect()
        .await;
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_collection_key_override() {
    let body = json!({"results": [{"id": 5}]});
    let transport = ScriptedTransport::new(vec![Ok(Some(body))]);
    let mut widgets: PagedCollection<Widget> =
        PagedCollection::new(transport, "/search").with_collection_key("results");

    assert_eq!(widgets.next().await.unwrap(), Some(Widget { id: 5 }));
}

#[test]
fn test_resource_kind_derived_from_type() {
    let transport = ScriptedTransport::new(vec![]);
    let widgets: PagedCollection<Widget> = PagedCollection::new(transport, "/widgets");
    assert_eq!(widgets.resource_kind(), "widgets");
}
