//! Live versus demo operation.

use std::fmt;

/// Where movie metadata comes from.
///
/// `--demo` swaps the TMDB API for the bundled catalogue; every other part
/// of the pipeline stays the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    /// Queries the configured TMDB API; needs an API key
    #[default]
    Live,
    /// Serves the bundled catalogue offline
    Demo,
}

impl RuntimeMode {
    /// Picks demo mode when the flag is set, live mode otherwise.
    pub fn from_demo_flag(demo: bool) -> Self {
        if demo { Self::Demo } else { Self::Live }
    }

    /// Whether lookups are served from the bundled catalogue.
    pub fn is_demo(self) -> bool {
        matches!(self, Self::Demo)
    }

    /// Whether configuration must carry an API key.
    pub fn requires_api_key(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Live => "LIVE",
            Self::Demo => "DEMO",
        })
    }
}
