//! `TmdbClient` - TMDB movie search client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::error::NetworkError;
use super::pacer::RequestPacer;
use super::types::{ResultPage, SearchMovieParams, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Path of the movie search endpoint, relative to the base URL.
const SEARCH_MOVIE_PATH: &str = "search/movie";

/// TMDB movie search client.
///
/// Performs no retries; a failed request surfaces as [`NetworkError`].
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Fully resolved `search/movie` URL.
    search_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Request pacing.
    pacer: Mutex<RequestPacer>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            min_interval: None,
        }
    }

    /// Overrides the base URL (self-hosted proxies, wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or blank.
    /// - `user_agent` is not set.
    /// - The search URL cannot be derived from the base URL.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.trim().is_empty())
            .context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            with_trailing_slash(url)
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };
        let search_url = base_url
            .join(SEARCH_MOVIE_PATH)
            .with_context(|| format!("failed to join URL path: {SEARCH_MOVIE_PATH}"))?;

        let pacer = self
            .min_interval
            .map_or_else(RequestPacer::default_interval, RequestPacer::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            search_url,
            api_token,
            pacer: Mutex::new(pacer),
        })
    }
}

/// Ensures relative joins land under the base path (`/3` -> `/3/`).
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }
}

impl MovieApi for TmdbClient {
    #[instrument(skip_all, fields(query = %params.query, page = params.page))]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<ResultPage, NetworkError> {
        self.pacer.lock().await.wait().await;

        let request = self
            .http_client
            .get(self.search_url.clone())
            .bearer_auth(&self.api_token)
            .query(&params.to_query())
            .build()?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TmdbErrorResponse>(&body) {
                Ok(err) => format!("code={}, message={}", err.status_code, err.status_message),
                Err(_) => body,
            };
            return Err(NetworkError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let page: ResultPage = serde_json::from_str(&body)?;
        tracing::debug!(
            results = page.results.len(),
            total_pages = page.total_pages,
            "TMDB API response"
        );
        Ok(page)
    }
}
