//! TMDB REST provider.

use std::fmt;

use async_trait::async_trait;
use marquee_core::{ConfigError, TmdbConfig};
use serde::de::DeserializeOwned;

use super::MovieMetadataProvider;
use crate::errors::MovieSearchError;
use crate::types::{ApiStatus, MovieDetails, SearchResponse};

/// Metadata provider backed by the TMDB v3 REST API.
#[derive(Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl fmt::Debug for TmdbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbProvider")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TmdbProvider {
    /// Creates a provider from TMDB settings.
    ///
    /// # Errors
    ///
    /// - `ConfigError::HttpClient` - If the HTTP client cannot be built
    pub fn new(config: &TmdbConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of the title search for an already trimmed query.
    ///
    /// Everything outside `A-Z a-z 0-9 - . _ ~` is percent-encoded, which
    /// includes `!'()*`. The server decodes to the same query either way.
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.api_base,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        )
    }

    /// URL of the detail lookup with embedded credits.
    pub fn details_url(&self, id: u64) -> String {
        format!(
            "{}/movie/{id}?api_key={}&append_to_response=credits",
            self.api_base,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: &str,
    ) -> Result<T, MovieSearchError> {
        tracing::debug!(endpoint, "TMDB request");

        let response = self.client.get(url).send().await.map_err(|e| {
            MovieSearchError::NetworkError {
                reason: format!("HTTP request to {endpoint} failed: {}", e.without_url()),
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MovieSearchError::NetworkError {
                reason: format!("reading {endpoint} response failed: {}", e.without_url()),
            })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiStatus>(&body)
                .ok()
                .and_then(|s| s.status_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string()
                });
            return Err(MovieSearchError::HttpStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            });
        }

        tracing::trace!(endpoint, bytes = body.len(), "TMDB response");

        serde_json::from_slice(&body).map_err(|e| MovieSearchError::ParseError {
            reason: format!("JSON parsing of {endpoint} failed: {e}"),
        })
    }
}

#[async_trait]
impl MovieMetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, MovieSearchError> {
        self.get_json("/search/movie", &self.search_url(query)).await
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, MovieSearchError> {
        self.get_json("/movie/{id}", &self.details_url(id)).await
    }
}
