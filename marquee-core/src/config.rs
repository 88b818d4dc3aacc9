//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No API key was supplied for live mode.
    #[error("missing TMDB API key (set TMDB_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// A configured base URL does not parse.
    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Configuration field holding the URL
        field: &'static str,
        /// Parser failure description
        reason: String,
    },

    /// A configured value could not be interpreted.
    #[error("invalid value '{value}' for {variable}")]
    InvalidValue {
        /// Environment variable that carried the value
        variable: &'static str,
        /// Raw value as supplied
        value: String,
    },

    /// The HTTP client could not be constructed from the settings.
    #[error("failed to build HTTP client: {reason}")]
    HttpClient {
        /// Builder failure description
        reason: String,
    },
}

/// Central configuration for all Marquee components.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub tmdb: TmdbConfig,
    pub server: ServerConfig,
}

/// Metadata API configuration.
///
/// Controls where requests go, how posters are addressed and which
/// credentials are attached to every request.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key appended to every request as `api_key`
    pub api_key: String,
    /// Base URL of the REST API, without trailing slash
    pub api_base: String,
    /// Base URL of the image CDN, without trailing slash
    pub image_base: String,
    /// Size segment used for poster URLs
    pub poster_size: &'static str,
    /// Poster shown when a movie has no poster path
    pub placeholder_poster: &'static str,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Overall request timeout (None = transport default)
    pub request_timeout: Option<Duration>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.themoviedb.org/3".to_string(),
            image_base: "https://image.tmdb.org/t/p".to_string(),
            poster_size: "w500",
            placeholder_poster: "/api/placeholder/300/450",
            user_agent: "marquee/0.1.0",
            request_timeout: None,
        }
    }
}

/// Web server binding configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` - If a numeric override does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` - If a numeric override does not parse
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(api_key) = get(API_KEY_ENV) {
            config.tmdb.api_key = api_key.trim().to_string();
        }

        if let Some(base) = get("MARQUEE_TMDB_API_BASE") {
            config.tmdb.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(base) = get("MARQUEE_TMDB_IMAGE_BASE") {
            config.tmdb.image_base = base.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = get("MARQUEE_REQUEST_TIMEOUT_SECS") {
            let seconds = timeout
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    variable: "MARQUEE_REQUEST_TIMEOUT_SECS",
                    value: timeout.clone(),
                })?;
            config.tmdb.request_timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(host) = get("MARQUEE_HOST") {
            config.server.host = host;
        }

        if let Some(port) = get("MARQUEE_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                variable: "MARQUEE_PORT",
                value: port.clone(),
            })?;
        }

        Ok(config)
    }

    /// Replaces the API key when an explicit one is supplied.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.tmdb.api_key = key.trim().to_string();
        }
        self
    }

    /// Checks the configuration before any request is made.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingApiKey` - If no API key is configured
    /// - `ConfigError::InvalidUrl` - If the API or image base is not a URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        self.validate_urls()
    }

    /// Checks only the base URLs; used when no API key is needed.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidUrl` - If the API or image base is not a URL
    pub fn validate_urls(&self) -> Result<(), ConfigError> {
        check_url("MARQUEE_TMDB_API_BASE", &self.tmdb.api_base)?;
        check_url("MARQUEE_TMDB_IMAGE_BASE", &self.tmdb.image_base)
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            field,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config_values() {
        let config = MarqueeConfig::default();

        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.image_base, "https://image.tmdb.org/t/p");
        assert_eq!(config.tmdb.poster_size, "w500");
        assert_eq!(config.tmdb.placeholder_poster, "/api/placeholder/300/450");
        assert!(config.tmdb.request_timeout.is_none());
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_env_override() {
        let env = vars(&[
            ("TMDB_API_KEY", " secret "),
            ("MARQUEE_TMDB_API_BASE", "http://127.0.0.1:9000/3/"),
            ("MARQUEE_REQUEST_TIMEOUT_SECS", "15"),
            ("MARQUEE_PORT", "8080"),
        ]);

        let config = MarqueeConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.tmdb.api_key, "secret");
        assert_eq!(config.tmdb.api_base, "http://127.0.0.1:9000/3");
        assert_eq!(config.tmdb.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let env = vars(&[("MARQUEE_PORT", "eighty")]);

        let err = MarqueeConfig::from_vars(|k| env.get(k).cloned()).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                variable: "MARQUEE_PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let env = vars(&[("TMDB_API_KEY", "   ")]);
        let config = MarqueeConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
        assert!(config.validate_urls().is_ok());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let env = vars(&[("TMDB_API_KEY", "from-env")]);
        let config = MarqueeConfig::from_vars(|k| env.get(k).cloned())
            .unwrap()
            .with_api_key(Some("from-flag".to_string()));

        assert_eq!(config.tmdb.api_key, "from-flag");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = MarqueeConfig::default().with_api_key(Some("key".to_string()));
        config.tmdb.image_base = "not a url".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl {
                field: "MARQUEE_TMDB_IMAGE_BASE",
                ..
            })
        ));
    }
}
