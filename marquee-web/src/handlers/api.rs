//! JSON API handlers and the placeholder poster

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use marquee_search::{ResolveOutcome, Snapshot};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// Largest placeholder edge served, in pixels.
const MAX_PLACEHOLDER_EDGE: u32 = 2000;

/// Query string of `GET /api/movie`.
#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    /// Movie title to look up
    #[serde(default)]
    pub q: String,
}

/// Outcome of a lookup plus the state it left behind.
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    /// What the lookup did
    pub outcome: ResolveOutcome,
    /// View state after the lookup
    pub state: Snapshot,
}

/// `GET /api/movie?q=` - runs a lookup and reports the resulting state.
pub async fn api_movie(
    State(state): State<AppState>,
    Query(params): Query<MovieQuery>,
) -> Json<MovieResponse> {
    let outcome = state.resolver.resolve(&params.q).await;

    Json(MovieResponse {
        outcome,
        state: state.resolver.snapshot(),
    })
}

/// `GET /api/state` - current view state without side effects.
pub async fn api_state(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.resolver.snapshot())
}

/// `GET /api/placeholder/{width}/{height}` - neutral poster stand-in.
pub async fn placeholder_poster(Path((width, height)): Path<(u32, u32)>) -> impl IntoResponse {
    let width = width.clamp(1, MAX_PLACEHOLDER_EDGE);
    let height = height.clamp(1, MAX_PLACEHOLDER_EDGE);

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<rect width="100%" height="100%" fill="#374151"/>
<text x="50%" y="50%" fill="#9ca3af" font-family="sans-serif" font-size="16" text-anchor="middle" dominant-baseline="middle">{width} × {height}</text>
</svg>"##
    );

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        svg,
    )
}
