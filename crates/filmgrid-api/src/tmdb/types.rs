//! TMDB search response types and search parameters.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Highest page number TMDB serves for a search query.
pub const MAX_PAGE: u32 = 500;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

// --- Search Movie ---

/// One page of results from the `search/movie` endpoint.
///
/// Replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Page number this response belongs to (1-based).
    pub page: u32,
    /// Results in API order.
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    /// Total number of pages for the query.
    pub total_pages: u32,
    /// Total number of results for the query.
    pub total_results: u32,
}

impl ResultPage {
    /// Returns the last page that can actually be requested.
    ///
    /// TMDB reports the full `total_pages` but refuses pages above `MAX_PAGE`.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        self.total_pages.min(MAX_PAGE)
    }

    /// Returns `true` if the page carries no results.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single movie search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD). TMDB sends `""` when unknown.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub backdrop_path: Option<String>,
}

impl MovieSummary {
    /// Parses the release date, if present and well-formed.
    #[must_use]
    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Returns the release year, if known.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release().map(|d| d.year())
    }

    /// Builds the poster URL for the given image size (e.g. `"w500"`).
    #[must_use]
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path.as_deref().map(|p| image_url(size, p))
    }

    /// Builds the backdrop URL for the given image size (e.g. `"original"`).
    #[must_use]
    pub fn backdrop_url(&self, size: &str) -> Option<String> {
        self.backdrop_path.as_deref().map(|p| image_url(size, p))
    }
}

/// Joins an image path onto the CDN base.
fn image_url(size: &str, path: &str) -> String {
    format!("{IMAGE_BASE_URL}{size}/{}", path.trim_start_matches('/'))
}

/// Treats `null`, missing and whitespace-only strings as `None`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

// --- Search Parameters ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required, non-empty).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language (default: "en-US").
    pub language: String,
    /// Include adult content.
    pub include_adult: bool,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            language: String::from("en-US"),
            include_adult: false,
            primary_release_year: None,
            year: None,
            region: None,
        }
    }

    /// Returns a copy of these params aimed at another query and page.
    ///
    /// Filters (language, year, region, adult flag) are kept.
    #[must_use]
    pub fn for_request(&self, query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
            ..self.clone()
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the adult content flag.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the query string pairs. Optional filters are only sent when set.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("language", self.language.clone()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_search_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_batman.json");

        // Act
        let page: ResultPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_results, 50);
        assert_eq!(page.results.len(), 3);
        let first = &page.results[0];
        assert_eq!(first.id, 268);
        assert_eq!(first.title, "Batman");
        assert_eq!(first.release_year(), Some(1989));
    }

    #[test]
    fn test_parse_empty_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_empty.json");

        // Act
        let page: ResultPage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_blank_fields_become_none() {
        // Arrange
        let json = r#"{"id":1,"title":"Untitled","release_date":"","overview":"  ","poster_path":null}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.overview, None);
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_year(), None);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_poster_url() {
        // Arrange
        let json = r#"{"id":1,"title":"Batman","poster_path":"/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Act
        let url = movie.poster_url("w500").unwrap();

        // Assert
        assert_eq!(
            url,
            "https://image.tmdb.org/t/p/w500/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"
        );
        assert_eq!(movie.backdrop_url("original"), None);
    }

    #[test]
    fn test_last_page_is_capped() {
        // Arrange
        let page = ResultPage {
            page: 1,
            results: Vec::new(),
            total_pages: 1_234,
            total_results: 24_680,
        };

        // Act & Assert
        assert_eq!(page.last_page(), MAX_PAGE);
    }

    #[test]
    fn test_query_defaults() {
        // Arrange
        let params = SearchMovieParams::new("batman");

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("query", String::from("batman")),
                ("page", String::from("1")),
                ("language", String::from("en-US")),
                ("include_adult", String::from("false")),
            ]
        );
    }

    #[test]
    fn test_query_includes_optional_filters() {
        // Arrange
        let params = SearchMovieParams::new("batman")
            .page(2)
            .language("ja-JP")
            .primary_release_year(1989)
            .region("JP");

        // Act
        let query = params.to_query();

        // Assert
        assert!(query.contains(&("page", String::from("2"))));
        assert!(query.contains(&("language", String::from("ja-JP"))));
        assert!(query.contains(&("primary_release_year", String::from("1989"))));
        assert!(query.contains(&("region", String::from("JP"))));
        assert!(!query.iter().any(|(k, _)| *k == "year"));
    }

    #[test]
    fn test_for_request_keeps_filters() {
        // Arrange
        let template = SearchMovieParams::new("").language("fr-FR").year(2008);

        // Act
        let params = template.for_request("dark knight", 3);

        // Assert
        assert_eq!(params.query, "dark knight");
        assert_eq!(params.page, 3);
        assert_eq!(params.language, "fr-FR");
        assert_eq!(params.year, Some(2008));
    }
}
