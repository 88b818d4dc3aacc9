//! Search page - the whole single-page interface

use axum::extract::State;
use axum::response::Html;

use crate::components::{layout, movie};
use crate::pages::base::render_page;
use crate::server::AppState;

/// Renders the search page from the current view state.
pub async fn search_page(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.resolver.snapshot();
    let subtitle = if state.mode.is_demo() {
        Some("Demo catalogue - no API key in use")
    } else {
        None
    };

    let content = format!(
        r#"{}
        {}
        {}"#,
        layout::page_header("Movie Search", subtitle),
        movie::search_form(&snapshot),
        movie::results_region(&snapshot)
    );

    render_page("Movie Search", &content)
}
