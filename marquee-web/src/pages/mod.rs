//! Full page handlers using component system
//!
//! Pages compose components into complete HTML responses.

pub mod base;
pub mod search;

// Re-export page handlers
pub use search::search_page;
