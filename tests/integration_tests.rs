//! Integration tests for Paper Search
//!
//! These tests drive the search box end to end against a local mock HTTP
//! server: request, decode, projection, rendering.

use paper_search::client::{ClientError, HttpSearchApi, SearchApi};
use paper_search::config::ApiConfig;
use paper_search::models::{DecodeError, DisplayResult};
use paper_search::render::{JsonSink, ListSink, ProjectionMode, Projector};
use paper_search::session::{SearchBox, SearchBoxError, Silent};
use paper_search::utils::TRUNCATION_MARKER;

fn api_for(server: &mockito::ServerGuard) -> HttpSearchApi {
    HttpSearchApi::new(&ApiConfig {
        base_url: server.url(),
        timeout_secs: 5,
        ..Default::default()
    })
    .expect("client should build")
}

fn long_response() -> String {
    let authors: Vec<String> = (0..30).map(|i| format!("\"Researcher {}\"", i)).collect();
    format!(
        r#"[
            {{"title":"T","authors":["A","B"],"journalTitle":"J","year":2020,"snippet":"short"}},
            {{"title":"Long","authors":[{}],"journalTitle":"Nature","year":2023,"snippet":"{}"}}
        ]"#,
        authors.join(","),
        "lorem ".repeat(80)
    )
}

#[tokio::test]
async fn test_search_box_end_to_end_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/0.1/search/climate%20models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(long_response())
        .create_async()
        .await;

    let mut search_box = SearchBox::new(
        api_for(&server),
        JsonSink::new(Vec::new()),
        Projector::default(),
    );
    let rendered = search_box.submit("climate models").await.unwrap();
    mock.assert_async().await;
    assert_eq!(rendered, 2);

    let out = String::from_utf8(search_box.into_sink().into_inner()).unwrap();
    let results: Vec<DisplayResult> = serde_json::from_str(&out).unwrap();

    assert_eq!(
        results[0],
        DisplayResult::Full {
            title_line: "T - J (2020)".to_string(),
            author_line: "A,B".to_string(),
            snippet_line: "short".to_string(),
        }
    );

    assert_eq!(results[1].title_line(), "Long - Nature (2023)");
    let authors = results[1].author_line().unwrap();
    assert_eq!(authors.chars().count(), 100);
    assert!(authors.starts_with("Researcher 0,Researcher 1,"));
    assert!(authors.ends_with(TRUNCATION_MARKER));

    let snippet = results[1].snippet_line().unwrap();
    assert_eq!(snippet.chars().count(), 250);
    assert!(snippet.ends_with(TRUNCATION_MARKER));
}

#[tokio::test]
async fn test_search_box_title_only_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/0.1/search/q")
        .with_status(200)
        .with_body(long_response())
        .create_async()
        .await;

    let mut search_box = SearchBox::new(
        api_for(&server),
        ListSink::new(Vec::new()),
        Projector::new(ProjectionMode::TitleOnly),
    );
    search_box.submit("q").await.unwrap();

    let out = String::from_utf8(search_box.into_sink().into_inner()).unwrap();
    assert_eq!(out, "  1. T\n  2. Long\n");
}

#[tokio::test]
async fn test_interactive_loop_sends_one_request_per_line() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/api/0.1/search/first")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/0.1/search/second%20one")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut search_box = SearchBox::new(
        api_for(&server),
        ListSink::new(Vec::new()),
        Projector::default(),
    );
    let input = tokio::io::BufReader::new(&b"first\n\nsecond one\n"[..]);
    let summary = search_box.run(input, &mut Silent).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn test_malformed_payload_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/0.1/search/q")
        .with_status(200)
        .with_body(r#"[{"title":"T","journalTitle":"J","year":2020,"snippet":""}]"#)
        .create_async()
        .await;

    let mut search_box = SearchBox::new(
        api_for(&server),
        ListSink::new(Vec::new()),
        Projector::default(),
    );
    let err = search_box.submit("q").await.unwrap_err();
    match err {
        SearchBoxError::Client(ClientError::Decode(DecodeError::MissingField {
            index,
            field,
        })) => {
            assert_eq!(index, 0);
            assert_eq!(field, "authors");
        }
        other => panic!("Expected missing authors, got {:?}", other),
    }
    assert!(search_box.into_sink().into_inner().is_empty());
}

#[tokio::test]
async fn test_api_as_trait_object() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/0.1/search/%C3%BCber")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api: std::sync::Arc<dyn SearchApi> = std::sync::Arc::new(api_for(&server));
    assert!(api.search("über").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_interactive_json_stream_has_one_line_per_query() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/0.1/search/a")
        .with_status(200)
        .with_body(long_response())
        .create_async()
        .await;
    server
        .mock("GET", "/api/0.1/search/b")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut search_box = SearchBox::new(
        api_for(&server),
        JsonSink::new(Vec::new()),
        Projector::new(ProjectionMode::TitleOnly),
    );
    let input = tokio::io::BufReader::new(&b"a\nb\n"[..]);
    search_box.run(input, &mut Silent).await.unwrap();

    let out = String::from_utf8(search_box.into_sink().into_inner()).unwrap();
    let docs: Vec<Vec<DisplayResult>> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].len(), 2);
    assert_eq!(docs[0][1].title_line(), "Long");
    assert!(docs[1].is_empty());
}
