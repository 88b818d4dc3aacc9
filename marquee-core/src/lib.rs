//! Marquee Core - shared building blocks
//!
//! Configuration loading and validation, the runtime mode switch, the
//! top-level error type and tracing setup used by every other crate.

pub mod config;
pub mod mode;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{ConfigError, MarqueeConfig, ServerConfig, TmdbConfig};
pub use mode::RuntimeMode;

/// Core errors that can bubble up to the binaries.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {reason}")]
    Server { reason: String },
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration(ConfigError::MissingApiKey) => {
                "A TMDB API key is required. Set TMDB_API_KEY or pass --api-key.".to_string()
            }
            MarqueeError::Configuration(e) => format!("Invalid configuration: {e}"),
            MarqueeError::Io(_) => "File system or network error occurred".to_string(),
            MarqueeError::Server { reason } => format!("Web server error: {reason}"),
        }
    }

    /// Checks if this error is due to user-supplied settings.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_the_variable() {
        let err = MarqueeError::from(ConfigError::MissingApiKey);

        assert!(err.is_user_error());
        assert!(err.user_message().contains("TMDB_API_KEY"));
    }

    #[test]
    fn test_server_error_is_not_user_error() {
        let err = MarqueeError::Server {
            reason: "address in use".to_string(),
        };

        assert!(!err.is_user_error());
        assert_eq!(err.user_message(), "Web server error: address in use");
    }
}
