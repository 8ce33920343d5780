//! API client library for filmgrid.
//!
//! Provides the TMDB movie search client.

/// TMDB API client.
pub mod tmdb;
