//! Movie search HTMX handlers

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use crate::components::movie;
use crate::server::AppState;

/// Form data posted by the search form and the query input.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    /// Current contents of the query input
    #[serde(default)]
    pub query: String,
}

/// Runs a lookup and returns the refreshed results region.
///
/// A blank query leaves state untouched, so the region re-renders as it was.
pub async fn search_movie(
    State(state): State<AppState>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    let outcome = state.resolver.resolve(&form.query).await;
    tracing::debug!(?outcome, "HTMX search finished");

    Html(movie::results_region(&state.resolver.snapshot()))
}

/// Records the draft query on every keystroke.
pub async fn update_query(
    State(state): State<AppState>,
    Form(form): Form<QueryForm>,
) -> StatusCode {
    state.resolver.set_query(&form.query);
    StatusCode::NO_CONTENT
}
