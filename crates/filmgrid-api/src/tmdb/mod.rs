//! TMDB API client module.
//!
//! Issues `search/movie` requests against the TMDB API v3
//! and decodes the paged result envelope.

mod api;
mod client;
mod error;
mod pacer;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
pub use error::NetworkError;
pub use types::{IMAGE_BASE_URL, MAX_PAGE, MovieSummary, ResultPage, SearchMovieParams};
