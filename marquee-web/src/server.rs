//! HTMX + Tailwind web server for Marquee
//!
//! Serves the single search page, its HTMX partials and a small JSON API.
//! All pages are rendered server-side from the resolver's view state.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use marquee_core::{MarqueeConfig, MarqueeError, RuntimeMode};
use marquee_search::{MovieResolver, PosterSettings, provider_for_mode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{api_movie, api_state, placeholder_poster};
use crate::htmx::{search_movie, update_query};
use crate::pages::search_page;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline and the view state it owns
    pub resolver: Arc<MovieResolver>,
    /// Whether the offline catalogue is in use
    pub mode: RuntimeMode,
}

impl AppState {
    /// Builds state for the given mode, validating configuration up front.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - Missing API key in live mode or bad URLs
    pub fn from_config(config: &MarqueeConfig, mode: RuntimeMode) -> Result<Self, MarqueeError> {
        let provider = provider_for_mode(mode, config)?;
        let resolver = MovieResolver::new(provider, PosterSettings::from(&config.tmdb));

        Ok(Self {
            resolver: Arc::new(resolver),
            mode,
        })
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(search_page))
        // HTMX partial update endpoints
        .route("/htmx/search", post(search_movie))
        .route("/htmx/query", post(update_query))
        // JSON API endpoints
        .route("/api/movie", get(api_movie))
        .route("/api/state", get(api_state))
        .route("/api/placeholder/{width}/{height}", get(placeholder_poster))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the web server until it is shut down.
///
/// # Errors
///
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
/// - `MarqueeError::Io` - Listener could not bind
/// - `MarqueeError::Server` - Server loop failed
pub async fn run_server(config: MarqueeConfig, mode: RuntimeMode) -> Result<(), MarqueeError> {
    let state = AppState::from_config(&config, mode)?;
    let app = router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%mode, "Marquee running on http://{address}");

    axum::serve(listener, app)
        .await
        .map_err(|e| MarqueeError::Server {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn demo_state() -> AppState {
        AppState::from_config(&MarqueeConfig::default(), RuntimeMode::Demo).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_live_mode_without_key_fails_fast() {
        let result = AppState::from_config(&MarqueeConfig::default(), RuntimeMode::Live);

        assert!(matches!(result, Err(MarqueeError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_initial_page_has_form_and_no_results() {
        let app = router(demo_state());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Movie Search"));
        assert!(html.contains(r#"hx-post="/htmx/search""#));
        assert!(html.contains(r#"<div id="results" class="mt-8"></div>"#));
    }

    #[tokio::test]
    async fn test_htmx_search_renders_details_and_page_keeps_them() {
        let state = demo_state();

        let response = router(state.clone())
            .oneshot(form_post("/htmx/search", "query=inception"))
            .await
            .unwrap();
        let fragment = body_text(response).await;
        assert!(fragment.starts_with(r#"<div id="results""#));
        assert!(fragment.contains("Inception (2010)"));
        assert!(fragment.contains("Christopher Nolan"));

        let page = router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(page).await;
        assert!(html.contains("Inception (2010)"));
        assert!(html.contains(r#"value="inception""#));
    }

    #[tokio::test]
    async fn test_htmx_search_without_match_shows_alert() {
        let response = router(demo_state())
            .oneshot(form_post("/htmx/search", "query=Plan+10"))
            .await
            .unwrap();

        let fragment = body_text(response).await;
        assert!(fragment.contains(r#"role="alert""#));
        assert!(fragment.contains("No results found"));
    }

    #[tokio::test]
    async fn test_query_keystrokes_are_stored() {
        let state = demo_state();

        let response = router(state.clone())
            .oneshot(form_post("/htmx/query", "query=Spir"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.resolver.snapshot().query, "Spir");
        assert!(!state.resolver.snapshot().loading);
    }

    #[tokio::test]
    async fn test_api_movie_reports_outcome_and_state() {
        let response = router(demo_state())
            .oneshot(
                Request::get("/api/movie?q=spirited%20away")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["outcome"], "resolved");
        assert_eq!(json["state"]["record"]["poster"], "/api/placeholder/300/450");
        assert_eq!(json["state"]["record"]["rating"], "8.5");
        assert_eq!(json["state"]["loading"], false);
    }

    #[tokio::test]
    async fn test_api_movie_blank_query_is_skipped() {
        let response = router(demo_state())
            .oneshot(Request::get("/api/movie?q=%20").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert!(json["state"]["record"].is_null());
    }

    #[tokio::test]
    async fn test_placeholder_poster_is_svg() {
        let response = router(demo_state())
            .oneshot(
                Request::get("/api/placeholder/300/450")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "image/svg+xml"
        );
        let svg = body_text(response).await;
        assert!(svg.contains(r#"width="300" height="450""#));
    }
}
