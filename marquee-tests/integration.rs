//! Integration tests for Marquee
//!
//! These tests drive the lookup pipeline against a local stand-in for the
//! TMDB REST API, covering the HTTP client, payload decoding, projection
//! and the view state transitions together.

#[path = "support/tmdb_stub.rs"]
mod tmdb_stub;

#[path = "integration/tmdb_provider.rs"]
mod tmdb_provider;

#[path = "integration/resolver_pipeline.rs"]
mod resolver_pipeline;
