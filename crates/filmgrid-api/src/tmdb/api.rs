//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::NetworkError;
use super::types::{ResultPage, SearchMovieParams};

/// Movie search API trait.
///
/// Abstracts the search endpoint so the search controller can be
/// driven by an in-memory API in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implementors implement `MovieApi` and get `LocalMovieApi` for free.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches one page of movies matching `params.query`.
    ///
    /// The caller must pass a non-empty query and a page `>= 1`;
    /// no validation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on transport failure, non-2xx status,
    /// or a malformed response body.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<ResultPage, NetworkError>;
}
