//! TMDB provider against the stub API: URLs, status handling, decoding.

use axum::http::StatusCode;
use marquee_core::{ConfigError, MarqueeConfig, RuntimeMode};
use marquee_search::{MovieMetadataProvider, MovieSearchError, TmdbProvider, provider_for_mode};

use crate::tmdb_stub::{Reply, TEST_API_KEY, TmdbStub, inception_details, search_body};

#[tokio::test]
async fn test_search_sends_key_and_escaped_query() {
    let stub = TmdbStub::start().await;
    stub.on_search("Amélie & Nino", Reply::json(search_body(&[(194, "Amélie")])));
    let provider = TmdbProvider::new(&stub.tmdb_config(TEST_API_KEY)).unwrap();

    let response = provider.search_movies("Amélie & Nino").await.unwrap();

    assert_eq!(response.top_hit().and_then(|hit| hit.id), Some(194));
    assert_eq!(
        stub.requests(),
        vec!["/3/search/movie?api_key=test-key&query=Am%C3%A9lie%20%26%20Nino".to_string()]
    );
}

#[tokio::test]
async fn test_details_request_embeds_credits() {
    let stub = TmdbStub::start().await;
    stub.on_details(27205, Reply::json(inception_details()));
    let provider = TmdbProvider::new(&stub.tmdb_config(TEST_API_KEY)).unwrap();

    let details = provider.movie_details(27205).await.unwrap();

    assert_eq!(details.title.as_deref(), Some("Inception"));
    let credits = details.credits.unwrap();
    assert_eq!(credits.cast.map(|c| c.len()), Some(6));
    assert_eq!(
        stub.requests(),
        vec!["/3/movie/27205?api_key=test-key&append_to_response=credits".to_string()]
    );
}

#[tokio::test]
async fn test_rejected_key_is_http_status_with_api_message() {
    let stub = TmdbStub::start().await;
    let provider = TmdbProvider::new(&stub.tmdb_config("wrong-key")).unwrap();

    let err = provider.search_movies("Inception").await.unwrap_err();

    match err {
        MovieSearchError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 401);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("expected HTTP status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_reason() {
    let stub = TmdbStub::start().await;
    stub.on_search(
        "Inception",
        Reply::raw(StatusCode::BAD_GATEWAY, "<html>upstream down</html>"),
    );
    let provider = TmdbProvider::new(&stub.tmdb_config(TEST_API_KEY)).unwrap();

    let err = provider.search_movies("Inception").await.unwrap_err();

    assert!(matches!(
        err,
        MovieSearchError::HttpStatus { status: 502, ref message, .. } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let stub = TmdbStub::start().await;
    stub.on_details(27205, Reply::raw(StatusCode::OK, "{\"id\": 27205, \"title\""));
    let provider = TmdbProvider::new(&stub.tmdb_config(TEST_API_KEY)).unwrap();

    let err = provider.movie_details(27205).await.unwrap_err();

    assert!(matches!(err, MovieSearchError::ParseError { .. }));
    assert!(!err.is_transport());
}

#[test]
fn test_live_mode_without_key_fails_before_any_request() {
    let err = provider_for_mode(RuntimeMode::Live, &MarqueeConfig::default()).unwrap_err();

    assert_eq!(err, ConfigError::MissingApiKey);
}

#[test]
fn test_live_mode_with_key_builds_provider() {
    let config = MarqueeConfig::default().with_api_key(Some(TEST_API_KEY.to_string()));

    assert!(provider_for_mode(RuntimeMode::Live, &config).is_ok());
}
