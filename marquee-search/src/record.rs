//! Display record and the projection that builds it from a detail payload.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::MovieSearchError;
use crate::types::{CastMember, CrewMember, MovieDetails};

/// Maximum number of cast names kept on a record.
pub const MAX_CAST: usize = 5;

/// Director shown when the crew lists none.
pub const UNKNOWN_DIRECTOR: &str = "N/A";

/// UI-ready movie data. Built once per successful lookup, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Display title, `Unknown Title` when missing
    pub title: String,
    /// Plot summary, `No plot available` when missing
    pub plot: String,
    /// Average vote with exactly one decimal digit
    pub rating: String,
    /// Genre names in source order
    pub genres: Vec<String>,
    /// Release year; `None` when the release date is missing or malformed
    pub year: Option<i32>,
    /// Absolute poster URL, or the placeholder image
    pub poster: String,
    /// First credited director, `N/A` when unknown
    pub director: String,
    /// Up to five names joined with `", "`
    pub cast: String,
}

impl MovieRecord {
    /// Year as rendered in the heading. An unparseable date renders `NaN`.
    pub fn year_label(&self) -> YearLabel {
        YearLabel(self.year)
    }
}

/// Display adapter for [`MovieRecord::year`].
#[derive(Debug, Clone, Copy)]
pub struct YearLabel(Option<i32>);

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(year) => write!(f, "{year}"),
            None => f.write_str("NaN"),
        }
    }
}

/// How poster URLs are built for a record.
#[derive(Debug, Clone)]
pub struct PosterSettings {
    /// Image CDN base, without trailing slash
    pub image_base: String,
    /// Size segment such as `w500`
    pub size: String,
    /// Used verbatim when the payload carries no poster path
    pub placeholder: String,
}

impl PosterSettings {
    /// Poster URL for an optional poster path.
    pub fn url_for(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if !path.is_empty() => {
                format!("{}/{}{}", self.image_base, self.size, path)
            }
            _ => self.placeholder.clone(),
        }
    }
}

impl Default for PosterSettings {
    fn default() -> Self {
        let tmdb = marquee_core::TmdbConfig::default();
        Self {
            image_base: tmdb.image_base,
            size: tmdb.poster_size.to_string(),
            placeholder: tmdb.placeholder_poster.to_string(),
        }
    }
}

impl From<&marquee_core::TmdbConfig> for PosterSettings {
    fn from(config: &marquee_core::TmdbConfig) -> Self {
        Self {
            image_base: config.image_base.clone(),
            size: config.poster_size.to_string(),
            placeholder: config.placeholder_poster.to_string(),
        }
    }
}

/// Projects a detail payload into a [`MovieRecord`].
///
/// # Errors
///
/// - `MovieSearchError::MissingField` - If `vote_average`, `genres` or any
///   part of `credits` is absent
pub fn project(
    details: &MovieDetails,
    posters: &PosterSettings,
) -> Result<MovieRecord, MovieSearchError> {
    let vote_average = details
        .vote_average
        .ok_or(MovieSearchError::MissingField {
            field: "vote_average",
        })?;
    let genres = details
        .genres
        .as_ref()
        .ok_or(MovieSearchError::MissingField { field: "genres" })?;
    let credits = details
        .credits
        .as_ref()
        .ok_or(MovieSearchError::MissingField { field: "credits" })?;
    let crew = credits
        .crew
        .as_deref()
        .ok_or(MovieSearchError::MissingField {
            field: "credits.crew",
        })?;
    let cast = credits
        .cast
        .as_deref()
        .ok_or(MovieSearchError::MissingField {
            field: "credits.cast",
        })?;

    Ok(MovieRecord {
        title: details.title.clone().unwrap_or_default(),
        plot: details.overview.clone().unwrap_or_default(),
        rating: format_rating(vote_average),
        genres: genres.iter().map(|g| g.name.clone()).collect(),
        year: details.release_date.as_deref().and_then(release_year),
        poster: posters.url_for(details.poster_path.as_deref()),
        director: find_director(crew),
        cast: leading_cast(cast),
    })
}

/// Formats a rating with one decimal digit.
///
/// Rounds to nearest; a value exactly halfway between two tenths rounds
/// away from zero (`8.25` becomes `"8.3"`), matching how browsers format it.
pub fn format_rating(value: f64) -> String {
    // Only multiples of 0.25 can sit exactly on a tie at one decimal.
    // Scaling by powers of two is exact, so this test is too.
    let is_tie = value.is_finite() && (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if is_tie {
        let tenths = (value.abs() * 10.0 + 0.5).floor();
        return format!("{:.1}", value.signum() * tenths / 10.0);
    }
    format!("{value:.1}")
}

/// Year of a release date. Accepts `YYYY-MM-DD` and a bare `YYYY`.
pub fn release_year(release_date: &str) -> Option<i32> {
    let trimmed = release_date.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.year());
    }
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    None
}

/// Name of the first crew member whose job is exactly `Director`. A missing
/// director or a blank name gives [`UNKNOWN_DIRECTOR`].
pub fn find_director(crew: &[CrewMember]) -> String {
    crew.iter()
        .find(|member| member.job.as_deref() == Some("Director"))
        .map(|member| member.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_DIRECTOR)
        .to_string()
}

/// Up to [`MAX_CAST`] names in billing order, comma separated.
pub fn leading_cast(cast: &[CastMember]) -> String {
    cast.iter()
        .take(MAX_CAST)
        .map(|member| member.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
