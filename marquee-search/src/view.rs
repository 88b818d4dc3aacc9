//! Render decisions derived from resolver state.
//!
//! Renderers (the HTMX page, the terminal) never read resolver state
//! directly; they take a [`Snapshot`] and follow [`Snapshot::content`].

use serde::{Deserialize, Serialize};

use crate::record::MovieRecord;

/// Trigger label while idle.
pub const SEARCH_LABEL: &str = "Search";

/// Trigger label while a lookup is in flight.
pub const BUSY_LABEL: &str = "Searching...";

/// Owned copy of the view state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Query as last typed or submitted
    pub query: String,
    /// True while a lookup is in flight
    pub loading: bool,
    /// Message for the alert region
    pub error: Option<String>,
    /// Last successfully resolved movie
    pub record: Option<MovieRecord>,
}

/// What the results region shows. The alert and the details block are
/// decided independently, so a failed lookup can show both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewContent<'a> {
    /// Error message for the alert region
    pub alert: Option<&'a str>,
    /// Movie details block
    pub movie: Option<&'a MovieRecord>,
}

impl ViewContent<'_> {
    /// Nothing to render (initial state, or a record hidden while loading).
    pub fn is_empty(&self) -> bool {
        self.alert.is_none() && self.movie.is_none()
    }
}

impl Snapshot {
    /// Results region content. The alert shows whenever an error is set;
    /// the record shows whenever present and no lookup is running.
    pub fn content(&self) -> ViewContent<'_> {
        ViewContent {
            alert: self.error.as_deref(),
            movie: self.record.as_ref().filter(|_| !self.loading),
        }
    }

    /// Whether the trigger is disabled.
    pub fn busy(&self) -> bool {
        self.loading
    }

    /// Label of the search trigger.
    pub fn trigger_label(&self) -> &'static str {
        if self.loading { BUSY_LABEL } else { SEARCH_LABEL }
    }
}
