//! HTMX partial update handlers
//!
//! Provides server-rendered HTML fragments swapped into the page.

pub mod search;

// Re-export main HTMX handlers
pub use search::{QueryForm, search_movie, update_query};
