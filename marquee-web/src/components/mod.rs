//! Reusable HTML components for HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments that can be used
//! in full pages or as HTMX partial updates.

pub mod layout;
pub mod movie;

// Re-export main component functions
pub use layout::{escape_html, page_header};
pub use movie::{alert, movie_details, results_region, search_form};
