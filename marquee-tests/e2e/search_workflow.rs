//! Browser-style workflow: load page, type, submit, read the swapped region.

use marquee_core::RuntimeMode;
use marquee_web::{AppState, router};
use serde_json::Value;

use crate::tmdb_stub::{Reply, TmdbStub, inception_details, search_body};

/// Starts the web server on an ephemeral port and returns its base URL.
async fn start_web(stub: &TmdbStub) -> String {
    let state = AppState::from_config(&stub.config(), RuntimeMode::Live).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{address}")
}

#[tokio::test]
async fn test_complete_search_workflow() {
    let stub = TmdbStub::start().await;
    stub.on_search("Inception", Reply::json(search_body(&[(27205, "Inception")])));
    stub.on_details(27205, Reply::json(inception_details()));
    let base = start_web(&stub).await;
    let client = reqwest::Client::new();

    // Initial page: form present, nothing rendered yet
    let page = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(page.status(), 200);
    let html = page.text().await.unwrap();
    assert!(html.contains("htmx.org"));
    assert!(html.contains(r#"hx-post="/htmx/search""#));
    assert!(html.contains(r#"<div id="results" class="mt-8"></div>"#));

    // Keystrokes are stored without a lookup
    let typed = client
        .post(format!("{base}/htmx/query"))
        .form(&[("query", "Incep")])
        .send()
        .await
        .unwrap();
    assert_eq!(typed.status(), 204);
    assert!(stub.requests().is_empty());

    // Submit swaps in the details block
    let fragment = client
        .post(format!("{base}/htmx/search"))
        .form(&[("query", "Inception")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(fragment.starts_with(r#"<div id="results""#));
    assert!(fragment.contains("Inception (2010)"));
    assert!(fragment.contains("★ 8.4"));
    assert!(fragment.contains(
        r#"src="https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg""#
    ));
    assert!(fragment.contains("Christopher Nolan"));
    assert!(!fragment.contains("Dileep Rao"));

    // State endpoint reflects the settled lookup
    let state: Value = client
        .get(format!("{base}/api/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["loading"], false);
    assert!(state["error"].is_null());
    assert_eq!(state["record"]["director"], "Christopher Nolan");
}

#[tokio::test]
async fn test_api_reports_no_results_then_recovers() {
    let stub = TmdbStub::start().await;
    stub.on_search("Inception", Reply::json(search_body(&[(27205, "Inception")])));
    stub.on_details(27205, Reply::json(inception_details()));
    let base = start_web(&stub).await;
    let client = reqwest::Client::new();

    let missing: Value = client
        .get(format!("{base}/api/movie"))
        .query(&[("q", "nothing like this")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(missing["outcome"], "no_results");
    assert_eq!(missing["state"]["error"], "No results found");

    let found: Value = client
        .get(format!("{base}/api/movie"))
        .query(&[("q", "Inception")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found["outcome"], "resolved");
    assert!(found["state"]["error"].is_null());
    assert_eq!(found["state"]["record"]["year"], 2010);
}

#[tokio::test]
async fn test_upstream_failure_renders_generic_alert() {
    let stub = TmdbStub::start().await;
    stub.on_search(
        "Inception",
        Reply::raw(axum::http::StatusCode::SERVICE_UNAVAILABLE, "{}"),
    );
    let base = start_web(&stub).await;

    let fragment = reqwest::Client::new()
        .post(format!("{base}/htmx/search"))
        .form(&[("query", "Inception")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(fragment.contains(r#"role="alert""#));
    assert!(fragment.contains("An error occurred while searching. Please try again."));
}

#[tokio::test]
async fn test_blank_submit_changes_nothing() {
    let stub = TmdbStub::start().await;
    let base = start_web(&stub).await;

    let fragment = reqwest::Client::new()
        .post(format!("{base}/htmx/search"))
        .form(&[("query", "   ")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(fragment, r#"<div id="results" class="mt-8"></div>"#);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_failed_search_keeps_previous_details_on_screen() {
    let stub = TmdbStub::start().await;
    stub.on_search("Inception", Reply::json(search_body(&[(27205, "Inception")])));
    stub.on_details(27205, Reply::json(inception_details()));
    // The hit's details are not scripted, so the stub answers 404
    stub.on_search("Ghost", Reply::json(search_body(&[(404_404, "Ghost")])));
    let base = start_web(&stub).await;
    let client = reqwest::Client::new();

    let submit = |query: &'static str| {
        client
            .post(format!("{base}/htmx/search"))
            .form(&[("query", query)])
            .send()
    };
    let first = submit("Inception").await.unwrap().text().await.unwrap();
    assert!(!first.contains(r#"role="alert""#));

    let fragment = submit("Ghost").await.unwrap().text().await.unwrap();

    assert!(fragment.contains("An error occurred while searching. Please try again."));
    assert!(fragment.contains("Inception (2010)"));
    assert!(fragment.contains("Christopher Nolan"));

    // No results clears the record, leaving only the alert
    let cleared = submit("nothing like this").await.unwrap().text().await.unwrap();
    assert!(cleared.contains("No results found"));
    assert!(!cleared.contains("Inception"));
}
