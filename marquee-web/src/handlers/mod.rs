//! HTTP request handlers organized by functionality

pub mod api;

// Re-export handler functions
pub use api::{MovieQuery, MovieResponse, api_movie, api_state, placeholder_poster};
