//! Marquee Search - movie lookup pipeline

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Resolves a free-text title into a display-ready [`MovieRecord`] by
//! chaining a title search and a detail fetch against a metadata provider,
//! and keeps the view state (query, loading flag, error, record) that the
//! web page and the CLI render from.

pub mod errors;
pub mod providers;
pub mod record;
pub mod resolver;
pub mod types;
pub mod view;

// Re-export main types
pub use errors::MovieSearchError;
pub use providers::{DemoProvider, MovieMetadataProvider, TmdbProvider, provider_for_mode};
pub use record::{MovieRecord, PosterSettings};
pub use resolver::{GENERIC_FAILURE_MESSAGE, MovieResolver, NO_RESULTS_MESSAGE, ResolveOutcome};
pub use view::{Snapshot, ViewContent};

/// Convenience type alias for Results with MovieSearchError.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
