//! Payload schema of the TMDB endpoints Marquee talks to.
//!
//! Every field the API may omit is an `Option`, so a missing field turns
//! into a checked `MissingField` error during projection instead of a panic.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads an absent or `null` string as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response of `GET /search/movie`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching movies, best match first
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
    /// Total number of matches across all pages
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl SearchResponse {
    /// First hit, if the search matched anything.
    pub fn top_hit(&self) -> Option<&SearchHit> {
        self.results.as_deref().and_then(<[SearchHit]>::first)
    }
}

/// A single search hit. Only `id` is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// TMDB movie id
    #[serde(default)]
    pub id: Option<u64>,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `GET /movie/{id}?append_to_response=credits`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie id
    #[serde(default)]
    pub id: Option<u64>,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Plot summary
    #[serde(default)]
    pub overview: Option<String>,
    /// Average user vote, 0 to 10
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Genres in TMDB order
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    /// ISO `YYYY-MM-DD`, sometimes empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    /// Path under the image CDN, with leading slash
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Present when requested with `append_to_response=credits`
    #[serde(default)]
    pub credits: Option<Credits>,
}

/// A genre tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    /// TMDB genre id
    #[serde(default)]
    pub id: Option<u64>,
    /// Genre name; blank when TMDB sends none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Embedded credits sub-resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    /// Behind-the-camera credits
    #[serde(default)]
    pub crew: Option<Vec<CrewMember>>,
    /// Cast in billing order
    #[serde(default)]
    pub cast: Option<Vec<CastMember>>,
}

/// One crew credit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    /// Job title such as `Director`
    #[serde(default)]
    pub job: Option<String>,
    /// Person's name; blank when TMDB sends none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// One cast credit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    /// Actor's name; blank when TMDB sends none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Role played
    #[serde(default)]
    pub character: Option<String>,
}

/// Error body TMDB returns alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    /// TMDB's own error code
    #[serde(default)]
    pub status_code: Option<i64>,
    /// Human-readable reason
    #[serde(default)]
    pub status_message: Option<String>,
}
