//! Search-then-detail resolution pipeline and the view state it drives.
//!
//! A lookup takes two sequential provider calls: a title search, then a
//! detail fetch for the first hit. The resulting [`MovieRecord`] replaces
//! whatever was shown before.
//!
//! Every call to [`MovieResolver::resolve`] takes a new generation number.
//! Only the most recently started lookup may write its outcome; an older
//! lookup that finishes late is dropped, so completion order never decides
//! what the view shows.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::errors::MovieSearchError;
use crate::providers::MovieMetadataProvider;
use crate::record::{MovieRecord, PosterSettings, project};
use crate::view::Snapshot;

/// Shown when the search matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Shown for every other failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// How a call to [`MovieResolver::resolve`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveOutcome {
    /// Blank query; nothing happened
    Skipped,
    /// A new record is on display
    Resolved,
    /// Search matched nothing; record cleared
    NoResults,
    /// A lookup step failed; previous record kept
    Failed,
    /// A newer lookup started before this one finished; result dropped
    Superseded,
}

#[derive(Debug, Default)]
struct ResolverState {
    view: Snapshot,
    generation: u64,
}

/// Owns the view state and runs lookups against a metadata provider.
#[derive(Debug)]
pub struct MovieResolver {
    provider: Arc<dyn MovieMetadataProvider>,
    posters: PosterSettings,
    state: Mutex<ResolverState>,
}

impl MovieResolver {
    /// Resolver with an empty view.
    pub fn new(provider: Arc<dyn MovieMetadataProvider>, posters: PosterSettings) -> Self {
        Self {
            provider,
            posters,
            state: Mutex::new(ResolverState::default()),
        }
    }

    /// Current view state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().view.clone()
    }

    /// Stores the draft query as typed. Does not trigger a lookup.
    pub fn set_query(&self, query: &str) {
        self.state.lock().view.query = query.to_string();
    }

    /// Resolves a free-text query into a movie record.
    ///
    /// Blank queries are ignored. Otherwise the view enters the loading
    /// state with its error cleared, and leaves it with either a record or
    /// an error message. Failures are logged and reported through the
    /// view; they are not returned.
    pub async fn resolve(&self, query: &str) -> ResolveOutcome {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            tracing::trace!("Ignoring blank query");
            return ResolveOutcome::Skipped;
        }

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.view.query = query.to_string();
            state.view.loading = true;
            state.view.error = None;
            state.generation
        };
        tracing::info!(generation, query = trimmed, "Resolving movie");

        let result = self.lookup(trimmed).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(
                generation,
                latest = state.generation,
                "Dropping result of superseded lookup"
            );
            return ResolveOutcome::Superseded;
        }

        state.view.loading = false;
        match result {
            Ok(Some(record)) => {
                tracing::info!(generation, title = %record.title, "Movie resolved");
                state.view.record = Some(record);
                ResolveOutcome::Resolved
            }
            Ok(None) => {
                tracing::info!(generation, query = trimmed, "Search returned no results");
                state.view.error = Some(NO_RESULTS_MESSAGE.to_string());
                state.view.record = None;
                ResolveOutcome::NoResults
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Search error");
                state.view.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
                ResolveOutcome::Failed
            }
        }
    }

    /// Runs both provider calls and the projection. `Ok(None)` means the
    /// search matched nothing.
    async fn lookup(&self, query: &str) -> Result<Option<MovieRecord>, MovieSearchError> {
        let search = self.provider.search_movies(query).await?;
        let Some(hit) = search.top_hit() else {
            return Ok(None);
        };
        let id = hit.id.ok_or(MovieSearchError::MissingField {
            field: "results[0].id",
        })?;

        let details = self.provider.movie_details(id).await?;
        project(&details, &self.posters).map(Some)
    }
}
