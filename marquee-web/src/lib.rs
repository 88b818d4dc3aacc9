//! Marquee Web - HTMX movie search page

#![deny(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered search page with HTMX partial updates, plus JSON
//! endpoints for scripted clients.

pub mod components;
pub mod handlers;
pub mod htmx;
pub mod pages;
pub mod server;

// Re-export main types
pub use server::{AppState, router, run_server};
