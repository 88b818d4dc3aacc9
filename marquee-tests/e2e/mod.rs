//! End-to-end tests for Marquee
//!
//! These tests run the web server on a real socket backed by the stub
//! TMDB API and exercise it over HTTP the way the browser does.

#[path = "../support/tmdb_stub.rs"]
mod tmdb_stub;

mod search_workflow;
