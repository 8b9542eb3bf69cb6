//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{JsonValue, QueryParams};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn content(body: &JsonValue) -> crate::Result<Vec<JsonValue>> {
    Ok(body["content"].as_array().cloned().unwrap_or_default())
}

async fn mount_page(server: &MockServer, page: u32, items: JsonValue) {
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("page", page.to_string()))
        .and(query_param("pageSize", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": items })))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(HttpClientConfig::builder().base_url(server.uri()).build()).unwrap()
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::default();
    state.add_fetched(100);
    state.add_fetched(40);
    state.next_page();

    assert_eq!(state.page, 1);
    assert_eq!(state.pages_fetched, 2);
    assert_eq!(state.total_fetched, 140);
}

// ============================================================================
// Page Number Paginator Tests
// ============================================================================

#[test]
fn test_page_number_paginator_initial_params() {
    let paginator = PageNumberPaginator::new(100, 10);
    let params = paginator.params(&PaginationState::default());
    assert_eq!(params.get("page"), Some(&"0".to_string()));
    assert_eq!(params.get("pageSize"), Some(&"100".to_string()));
}

#[test]
fn test_page_number_paginator_continues_on_short_page() {
    let paginator = PageNumberPaginator::new(100, 10);
    let mut state = PaginationState::default();

    // A short page does not end iteration, only an empty one does
    let next = paginator.process_page(3, &mut state);
    let mut expected = QueryParams::new();
    expected.insert("page".to_string(), "1".to_string());
    expected.insert("pageSize".to_string(), "100".to_string());
    assert_eq!(next, NextPage::with_params(expected));
    assert_eq!(state.total_fetched, 3);
}

#[test]
fn test_page_number_paginator_stops_on_empty() {
    let paginator = PageNumberPaginator::new(100, 10);
    let mut state = PaginationState::default();
    assert_eq!(paginator.process_page(0, &mut state), NextPage::Done);
    assert_eq!(state.pages_fetched, 1);
}

#[test]
fn test_page_number_paginator_limit() {
    let paginator = PageNumberPaginator::new(100, 2);
    let mut state = PaginationState::default();
    assert!(paginator.check_limit(&state).is_ok());
    paginator.process_page(5, &mut state);
    paginator.process_page(5, &mut state);
    assert!(matches!(
        paginator.check_limit(&state),
        Err(Error::PageLimitExceeded { max_pages: 2 })
    ));
}

// ============================================================================
// Page Loop Tests
// ============================================================================

#[tokio::test]
async fn test_collect_pages_until_empty() {
    let server = MockServer::start().await;
    mount_page(&server, 0, json!([{"id": 1}, {"id": 2}])).await;
    mount_page(&server, 1, json!([{"id": 3}])).await;
    mount_page(&server, 2, json!([])).await;

    let mut base = QueryParams::new();
    base.insert("compSeasons".to_string(), "719".to_string());

    let items = collect_pages(
        &client(&server),
        "players",
        &base,
        &PageNumberPaginator::new(100, 10),
        None,
        content,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[2]["id"], 3);
}

#[tokio::test]
async fn test_collect_pages_hits_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": [{"id": 1}]})))
        .expect(3)
        .mount(&server)
        .await;

    let err = collect_pages(
        &client(&server),
        "players",
        &QueryParams::new(),
        &PageNumberPaginator::new(100, 3),
        None,
        content,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::PageLimitExceeded { max_pages: 3 }));
}

#[tokio::test]
async fn test_collect_pages_cancelled() {
    let server = MockServer::start().await;
    mount_page(&server, 0, json!([{"id": 1}])).await;

    let token = CancellationToken::new();
    token.cancel();

    let err = collect_pages(
        &client(&server),
        "players",
        &QueryParams::new(),
        &PageNumberPaginator::new(100, 10),
        Some(&token),
        content,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_collect_pages_propagates_extract_error() {
    let server = MockServer::start().await;
    mount_page(&server, 0, json!([{"id": 1}])).await;

    let err = collect_pages(
        &client(&server),
        "players",
        &QueryParams::new(),
        &PageNumberPaginator::new(100, 10),
        None,
        |_: &JsonValue| -> crate::Result<Vec<JsonValue>> { Err(Error::malformed("missing content")) },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
}
