//! Scripted provider for resolver tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::MovieMetadataProvider;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetails, SearchHit, SearchResponse};

/// One queued answer, optionally held back until its gate is released.
#[derive(Debug)]
struct Scripted<T> {
    result: Result<T, MovieSearchError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Provider that replays queued answers in call order.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    searches: Mutex<VecDeque<Scripted<SearchResponse>>>,
    details: Mutex<VecDeque<Scripted<MovieDetails>>>,
    queries: Mutex<Vec<String>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Provider with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search response listing the given ids, in order.
    pub fn hits(ids: &[u64]) -> SearchResponse {
        SearchResponse {
            results: Some(
                ids.iter()
                    .map(|id| SearchHit {
                        id: Some(*id),
                        title: None,
                    })
                    .collect(),
            ),
            total_results: Some(ids.len() as u64),
        }
    }

    /// Queues a search answer.
    pub fn push_search(&self, result: Result<SearchResponse, MovieSearchError>) {
        self.searches.lock().push_back(Scripted { result, gate: None });
    }

    /// Queues a search answer that waits until the returned sender fires.
    pub fn push_search_gated(
        &self,
        result: Result<SearchResponse, MovieSearchError>,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.searches.lock().push_back(Scripted {
            result,
            gate: Some(gate),
        });
        release
    }

    /// Queues a details answer.
    pub fn push_details(&self, result: Result<MovieDetails, MovieSearchError>) {
        self.details.lock().push_back(Scripted { result, gate: None });
    }

    /// Number of search requests served.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of details requests served.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Search queries in the order received.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

async fn replay<T>(next: Option<Scripted<T>>) -> Result<T, MovieSearchError> {
    let Some(scripted) = next else {
        return Err(MovieSearchError::NetworkError {
            reason: "script exhausted".to_string(),
        });
    };
    if let Some(gate) = scripted.gate {
        let _ = gate.await;
    }
    scripted.result
}

#[async_trait]
impl MovieMetadataProvider for ScriptedProvider {
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, MovieSearchError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.to_string());
        let next = self.searches.lock().pop_front();
        replay(next).await
    }

    async fn movie_details(&self, _id: u64) -> Result<MovieDetails, MovieSearchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.details.lock().pop_front();
        replay(next).await
    }
}
