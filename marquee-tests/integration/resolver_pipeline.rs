//! Search-then-detail resolution over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use marquee_core::RuntimeMode;
use marquee_search::{
    GENERIC_FAILURE_MESSAGE, MovieResolver, NO_RESULTS_MESSAGE, PosterSettings, ResolveOutcome,
    provider_for_mode,
};
use serde_json::json;

use crate::tmdb_stub::{Reply, TmdbStub, inception_details, search_body, simple_details};

fn resolver_for(stub: &TmdbStub) -> MovieResolver {
    let config = stub.config();
    let provider = provider_for_mode(RuntimeMode::Live, &config).unwrap();
    MovieResolver::new(provider, PosterSettings::from(&config.tmdb))
}

async fn stub_with_inception() -> TmdbStub {
    let stub = TmdbStub::start().await;
    stub.on_search(
        "Inception",
        Reply::json(search_body(&[(27205, "Inception"), (64956, "Inception: The Cobol Job")])),
    );
    stub.on_details(27205, Reply::json(inception_details()));
    stub
}

#[tokio::test]
async fn test_inception_lookup_builds_full_record() {
    let stub = stub_with_inception().await;
    let resolver = resolver_for(&stub);

    let outcome = resolver.resolve("  Inception  ").await;

    assert_eq!(outcome, ResolveOutcome::Resolved);
    let snapshot = resolver.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.query, "  Inception  ");

    let record = snapshot.record.unwrap();
    assert_eq!(record.title, "Inception");
    assert_eq!(record.rating, "8.4");
    assert_eq!(record.year, Some(2010));
    assert_eq!(
        record.genres,
        vec!["Action", "Science Fiction", "Adventure"]
    );
    assert_eq!(
        record.poster,
        "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"
    );
    assert_eq!(record.director, "Christopher Nolan");
    assert_eq!(
        record.cast,
        "Leonardo DiCaprio, Joseph Gordon-Levitt, Ken Watanabe, Tom Hardy, Elliot Page"
    );

    // Only the first hit is fetched
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("query=Inception"));
    assert!(requests[1].starts_with("/3/movie/27205?"));
}

#[tokio::test]
async fn test_empty_results_show_no_results_and_skip_details() {
    let stub = stub_with_inception().await;
    let resolver = resolver_for(&stub);
    resolver.resolve("Inception").await;

    let outcome = resolver.resolve("zzqx").await;

    assert_eq!(outcome, ResolveOutcome::NoResults);
    let snapshot = resolver.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some(NO_RESULTS_MESSAGE));
    assert!(snapshot.record.is_none());
    assert_eq!(stub.requests().len(), 3);
}

#[tokio::test]
async fn test_rejected_key_shows_generic_failure() {
    let stub = TmdbStub::start().await;
    let config = stub.config();
    let mut tmdb = config.tmdb.clone();
    tmdb.api_key = "revoked".to_string();
    let provider = Arc::new(marquee_search::TmdbProvider::new(&tmdb).unwrap());
    let resolver = MovieResolver::new(provider, PosterSettings::from(&tmdb));

    let outcome = resolver.resolve("Inception").await;

    assert_eq!(outcome, ResolveOutcome::Failed);
    assert_eq!(
        resolver.snapshot().error.as_deref(),
        Some(GENERIC_FAILURE_MESSAGE)
    );
}

#[tokio::test]
async fn test_failure_shows_alert_with_previous_record() {
    let stub = stub_with_inception().await;
    stub.on_search("Ghost", Reply::json(search_body(&[(404_404, "Ghost")])));
    let resolver = resolver_for(&stub);
    resolver.resolve("Inception").await;

    // Details for the hit are not scripted, so the stub answers 404
    let outcome = resolver.resolve("Ghost").await;

    assert_eq!(outcome, ResolveOutcome::Failed);
    let snapshot = resolver.snapshot();
    let content = snapshot.content();
    assert_eq!(content.alert, Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(content.movie.map(|r| r.title.as_str()), Some("Inception"));
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_payload_without_credits_is_generic_failure() {
    let stub = TmdbStub::start().await;
    stub.on_search("Nocredits", Reply::json(search_body(&[(7, "Nocredits")])));
    let mut body = simple_details(7, "Nocredits");
    body.as_object_mut().unwrap().remove("credits");
    stub.on_details(7, Reply::json(body));
    let resolver = resolver_for(&stub);

    let outcome = resolver.resolve("Nocredits").await;

    assert_eq!(outcome, ResolveOutcome::Failed);
    assert_eq!(
        resolver.snapshot().error.as_deref(),
        Some(GENERIC_FAILURE_MESSAGE)
    );
}

#[tokio::test]
async fn test_malformed_search_body_is_generic_failure() {
    let stub = TmdbStub::start().await;
    stub.on_search("Broken", Reply::raw(StatusCode::OK, "not json"));
    let resolver = resolver_for(&stub);

    assert_eq!(resolver.resolve("Broken").await, ResolveOutcome::Failed);
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn test_sparse_payload_uses_fallbacks() {
    let stub = TmdbStub::start().await;
    stub.on_search("Sparse", Reply::json(search_body(&[(9, "Sparse")])));
    stub.on_details(
        9,
        Reply::json(json!({
            "id": 9,
            "vote_average": 0,
            "genres": [],
            "release_date": "",
            "credits": { "cast": [], "crew": [{ "name": "Writer", "job": "Screenplay" }] }
        })),
    );
    let resolver = resolver_for(&stub);

    assert_eq!(resolver.resolve("Sparse").await, ResolveOutcome::Resolved);
    let record = resolver.snapshot().record.unwrap();
    assert_eq!(record.title, "");
    assert_eq!(record.rating, "0.0");
    assert_eq!(record.year_label().to_string(), "NaN");
    assert_eq!(record.poster, "/api/placeholder/300/450");
    assert_eq!(record.director, "N/A");
    assert_eq!(record.cast, "");
}

#[tokio::test]
async fn test_slow_earlier_lookup_does_not_overwrite_later_one() {
    let stub = TmdbStub::start().await;
    stub.on_search(
        "Slow",
        Reply::json(search_body(&[(1, "Slow")])).delayed(Duration::from_millis(300)),
    );
    stub.on_details(1, Reply::json(simple_details(1, "Slow")));
    stub.on_search("Fast", Reply::json(search_body(&[(2, "Fast")])));
    stub.on_details(2, Reply::json(simple_details(2, "Fast")));
    let resolver = resolver_for(&stub);

    let (slow, fast) = futures::future::join(resolver.resolve("Slow"), resolver.resolve("Fast")).await;

    assert_eq!(slow, ResolveOutcome::Superseded);
    assert_eq!(fast, ResolveOutcome::Resolved);
    let snapshot = resolver.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.query, "Fast");
    assert_eq!(snapshot.record.map(|r| r.title), Some("Fast".to_string()));
}
