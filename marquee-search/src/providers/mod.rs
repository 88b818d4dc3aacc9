//! Metadata provider implementations.

use std::sync::Arc;

use async_trait::async_trait;
use marquee_core::{ConfigError, MarqueeConfig, RuntimeMode};

use crate::errors::MovieSearchError;
use crate::types::{MovieDetails, SearchResponse};

pub mod demo;
#[cfg(test)]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::ScriptedProvider;
pub use tmdb::TmdbProvider;

/// Source of movie metadata.
///
/// Implementations provide the two lookups the resolver chains together
/// (the real TMDB API, the offline demo catalogue, scripted test doubles).
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync + std::fmt::Debug {
    /// Searches movies by free-text title.
    ///
    /// # Errors
    /// - `MovieSearchError::NetworkError` - Transport failure
    /// - `MovieSearchError::HttpStatus` - API rejected the request
    /// - `MovieSearchError::ParseError` - Body was not a search response
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, MovieSearchError>;

    /// Fetches full details plus credits for one movie.
    ///
    /// # Errors
    /// - `MovieSearchError::NetworkError` - Transport failure
    /// - `MovieSearchError::HttpStatus` - API rejected the request
    /// - `MovieSearchError::ParseError` - Body was not a detail response
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, MovieSearchError>;
}

/// Builds the provider matching the runtime mode.
///
/// Live mode validates the configuration first so a missing API key fails
/// here instead of surfacing later as a rejected request.
///
/// # Errors
/// - `ConfigError::MissingApiKey` - Live mode without an API key
/// - `ConfigError::InvalidUrl` - Unparseable API or image base
/// - `ConfigError::HttpClient` - HTTP client could not be built
pub fn provider_for_mode(
    mode: RuntimeMode,
    config: &MarqueeConfig,
) -> Result<Arc<dyn MovieMetadataProvider>, ConfigError> {
    if mode.requires_api_key() {
        config.validate()?;
    } else {
        config.validate_urls()?;
    }

    match mode {
        RuntimeMode::Live => Ok(Arc::new(TmdbProvider::new(&config.tmdb)?)),
        RuntimeMode::Demo => Ok(Arc::new(DemoProvider::new())),
    }
}
