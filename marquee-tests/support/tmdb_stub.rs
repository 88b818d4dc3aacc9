//! In-process stand-in for the TMDB REST API.
//!
//! Serves `/3/search/movie` and `/3/movie/{id}` on an ephemeral port with
//! scripted replies and records every request it sees.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use marquee_core::{MarqueeConfig, TmdbConfig};
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "test-key";

/// One scripted HTTP reply.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct StubState {
    searches: Mutex<HashMap<String, Reply>>,
    details: Mutex<HashMap<u64, Reply>>,
    requests: Mutex<Vec<String>>,
}

/// Handle to a running stub server.
#[derive(Clone)]
pub struct TmdbStub {
    state: Arc<StubState>,
    pub api_base: String,
}

impl TmdbStub {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/3/search/movie", get(search))
            .route("/3/movie/{id}", get(details))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            api_base: format!("http://{address}/3"),
        }
    }

    pub fn on_search(&self, query: &str, reply: Reply) {
        self.state.searches.lock().insert(query.to_string(), reply);
    }

    pub fn on_details(&self, id: u64, reply: Reply) {
        self.state.details.lock().insert(id, reply);
    }

    /// Path and query of every request received, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().clone()
    }

    pub fn tmdb_config(&self, api_key: &str) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.to_string(),
            api_base: self.api_base.clone(),
            request_timeout: Some(Duration::from_secs(5)),
            ..TmdbConfig::default()
        }
    }

    pub fn config(&self) -> MarqueeConfig {
        MarqueeConfig {
            tmdb: self.tmdb_config(TEST_API_KEY),
            ..MarqueeConfig::default()
        }
    }
}

async fn respond(reply: Reply) -> Response {
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json;charset=utf-8")],
        reply.body,
    )
        .into_response()
}

fn unauthorized() -> Reply {
    Reply {
        status: StatusCode::UNAUTHORIZED,
        body: json!({
            "success": false,
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })
        .to_string(),
        delay: None,
    }
}

async fn search(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().push(uri.to_string());
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return respond(unauthorized()).await;
    }

    let query = params.get("query").cloned().unwrap_or_default();
    let reply = state
        .searches
        .lock()
        .get(&query)
        .cloned()
        .unwrap_or_else(|| Reply::json(search_body(&[])));
    respond(reply).await
}

async fn details(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().push(uri.to_string());
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return respond(unauthorized()).await;
    }

    let reply = state.details.lock().get(&id).cloned().unwrap_or_else(|| {
        Reply::raw(
            StatusCode::NOT_FOUND,
            &json!({
                "success": false,
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })
            .to_string(),
        )
    });
    respond(reply).await
}

/// Search payload listing the given ids in order.
pub fn search_body(ids: &[(u64, &str)]) -> Value {
    let results: Vec<Value> = ids
        .iter()
        .map(|(id, title)| json!({ "id": id, "title": title }))
        .collect();
    json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": ids.len()
    })
}

/// Detail payload for Inception as TMDB returns it with credits.
pub fn inception_details() -> Value {
    json!({
        "id": 27205,
        "title": "Inception",
        "overview": "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets.",
        "vote_average": 8.364,
        "genres": [
            { "id": 28, "name": "Action" },
            { "id": 878, "name": "Science Fiction" },
            { "id": 12, "name": "Adventure" }
        ],
        "release_date": "2010-07-15",
        "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
        "runtime": 148,
        "credits": {
            "cast": [
                { "name": "Leonardo DiCaprio", "character": "Cobb" },
                { "name": "Joseph Gordon-Levitt", "character": "Arthur" },
                { "name": "Ken Watanabe", "character": "Saito" },
                { "name": "Tom Hardy", "character": "Eames" },
                { "name": "Elliot Page", "character": "Ariadne" },
                { "name": "Dileep Rao", "character": "Yusuf" }
            ],
            "crew": [
                { "name": "Hans Zimmer", "job": "Original Music Composer" },
                { "name": "Christopher Nolan", "job": "Director" },
                { "name": "Christopher Nolan", "job": "Screenplay" }
            ]
        }
    })
}

/// Minimal valid detail payload.
pub fn simple_details(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("{title} overview"),
        "vote_average": 6.0,
        "genres": [{ "id": 18, "name": "Drama" }],
        "release_date": "1999-01-01",
        "poster_path": null,
        "credits": { "cast": [], "crew": [] }
    })
}
