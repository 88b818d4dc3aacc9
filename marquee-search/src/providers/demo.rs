//! Demo provider implementation for offline development.

use async_trait::async_trait;

use super::MovieMetadataProvider;
use crate::errors::MovieSearchError;
use crate::types::{CastMember, Credits, CrewMember, Genre, MovieDetails, SearchHit, SearchResponse};

/// Offline catalogue serving a handful of well-known titles.
///
/// Lets the page and the CLI be exercised without an API key. Matching is a
/// case-insensitive substring test on the title.
#[derive(Debug)]
pub struct DemoProvider {
    catalogue: Vec<MovieDetails>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    /// Provider serving the built-in catalogue.
    pub fn new() -> Self {
        Self {
            catalogue: vec![
                demo_movie(
                    27205,
                    "Inception",
                    "Cobb, a skilled thief who commits corporate espionage by infiltrating \
                     the subconscious of his targets, is offered a chance to regain his old life.",
                    8.364,
                    &["Action", "Science Fiction", "Adventure"],
                    "2010-07-15",
                    Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"),
                    "Christopher Nolan",
                    &[
                        "Leonardo DiCaprio",
                        "Joseph Gordon-Levitt",
                        "Ken Watanabe",
                        "Tom Hardy",
                        "Elliot Page",
                        "Dileep Rao",
                    ],
                ),
                demo_movie(
                    603,
                    "The Matrix",
                    "Set in the 22nd century, The Matrix tells the story of a computer hacker \
                     who joins a group of underground insurgents fighting the vast computers.",
                    8.2,
                    &["Action", "Science Fiction"],
                    "1999-03-31",
                    Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
                    "Lana Wachowski",
                    &["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"],
                ),
                demo_movie(
                    129,
                    "Spirited Away",
                    "A young girl, Chihiro, becomes trapped in a strange new world of spirits.",
                    8.5,
                    &["Animation", "Family", "Fantasy"],
                    "2001-07-20",
                    None,
                    "Hayao Miyazaki",
                    &["Rumi Hiiragi", "Miyu Irino", "Mari Natsuki"],
                ),
                demo_movie(
                    1_000_001,
                    "Untitled Demo Project",
                    "",
                    0.0,
                    &[],
                    "",
                    None,
                    "",
                    &[],
                ),
            ],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_movie(
    id: u64,
    title: &str,
    overview: &str,
    vote_average: f64,
    genres: &[&str],
    release_date: &str,
    poster_path: Option<&str>,
    director: &str,
    cast: &[&str],
) -> MovieDetails {
    let crew = if director.is_empty() {
        Vec::new()
    } else {
        vec![
            CrewMember {
                job: Some("Producer".to_string()),
                name: "Demo Producer".to_string(),
            },
            CrewMember {
                job: Some("Director".to_string()),
                name: director.to_string(),
            },
        ]
    };

    MovieDetails {
        id: Some(id),
        title: Some(title.to_string()),
        overview: Some(overview.to_string()),
        vote_average: Some(vote_average),
        genres: Some(
            genres
                .iter()
                .map(|name| Genre {
                    id: None,
                    name: name.to_string(),
                })
                .collect(),
        ),
        release_date: Some(release_date.to_string()),
        poster_path: poster_path.map(str::to_string),
        credits: Some(Credits {
            crew: Some(crew),
            cast: Some(
                cast.iter()
                    .map(|name| CastMember {
                        name: name.to_string(),
                        character: None,
                    })
                    .collect(),
            ),
        }),
    }
}

#[async_trait]
impl MovieMetadataProvider for DemoProvider {
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, MovieSearchError> {
        let needle = query.to_lowercase();
        let results: Vec<SearchHit> = self
            .catalogue
            .iter()
            .filter(|movie| {
                movie
                    .title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .map(|movie| SearchHit {
                id: movie.id,
                title: movie.title.clone(),
            })
            .collect();

        Ok(SearchResponse {
            total_results: Some(results.len() as u64),
            results: Some(results),
        })
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, MovieSearchError> {
        self.catalogue
            .iter()
            .find(|movie| movie.id == Some(id))
            .cloned()
            .ok_or_else(|| MovieSearchError::HttpStatus {
                status: 404,
                endpoint: "/movie/{id}".to_string(),
                message: "The resource you requested could not be found.".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let provider = DemoProvider::new();

        let response = provider.search_movies("matrix").await.unwrap();

        assert_eq!(response.top_hit().and_then(|hit| hit.id), Some(603));
    }

    #[tokio::test]
    async fn test_unknown_title_has_empty_results() {
        let provider = DemoProvider::new();

        let response = provider.search_movies("Plan 10").await.unwrap();

        assert_eq!(response.results.map(|r| r.len()), Some(0));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let provider = DemoProvider::new();

        let err = provider.movie_details(42).await.unwrap_err();

        assert!(matches!(err, MovieSearchError::HttpStatus { status: 404, .. }));
    }
}
