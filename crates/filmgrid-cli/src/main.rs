//! filmgrid - terminal movie search client for TMDB.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use filmgrid_api::tmdb::{MovieApi, TmdbClient};
use tracing::instrument;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};
use crate::logging::{LogDestination, init_tracing};

/// Environment variable holding the TMDB v4 read access token.
const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Environment variable overriding the TMDB base URL.
const BASE_URL_ENV: &str = "TMDB_BASE_URL";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies once and print one page of results.
    Search(SearchArgs),
    /// Browse search results interactively.
    Tui(TuiArgs),
    /// Inspect configuration.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-500).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=500))]
    page: u32,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args)]
struct TuiArgs {
    /// Query submitted at startup.
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration (the API token is never shown).
    Show,
}

/// Picks the base URL: `TMDB_BASE_URL`, then config, then the client default.
///
/// # Errors
///
/// Returns an error if the chosen URL does not parse.
fn resolve_base_url(env_value: Option<String>, tmdb: &TmdbConfig) -> Result<Option<Url>> {
    let Some(raw) = env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| tmdb.base_url.clone())
    else {
        return Ok(None);
    };
    Url::parse(raw.trim())
        .map(Some)
        .with_context(|| format!("invalid TMDB base URL: {raw}"))
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the base URL is
/// invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(tmdb: &TmdbConfig) -> Result<TmdbClient> {
    let api_token =
        std::env::var(TOKEN_ENV).context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(url) = resolve_base_url(std::env::var(BASE_URL_ENV).ok(), tmdb)? {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the TMDB client fails to
/// build, or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("search query must not be blank");
    }

    let client = build_tmdb_client(&config.tmdb)?;

    let mut params = config.tmdb.search_template().for_request(query, args.page);
    if let Some(language) = &args.language {
        params = params.language(language);
    }
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!(
        "Page {}/{} ({} results)",
        response.page,
        response.last_page(),
        response.total_results
    );
    if response.is_empty() {
        tracing::info!("No movies found for your request.");
        return Ok(());
    }
    tracing::info!("ID\tTitle\t\t\tReleaseDate\tRating");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t\t{}\t{:.1} ({})",
            movie.id,
            movie.title,
            movie.release_date.as_deref().unwrap_or("-"),
            movie.vote_average,
            movie.vote_count,
        );
    }

    Ok(())
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the terminal
/// cannot be driven.
#[instrument(skip_all)]
async fn run_tui(args: TuiArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(&config.tmdb)?;
    filmgrid_tui::run_search_app(Arc::new(client), config.tmdb.search_template(), args.query).await
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be rendered.
fn run_config_show(config_path: &std::path::Path, config: &AppConfig) -> Result<()> {
    let token_state = match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => "set",
        _ => "not set",
    };
    let base_url_override = std::env::var(BASE_URL_ENV).ok();

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!("{TOKEN_ENV}: {token_state}");
    if let Some(url) = base_url_override {
        tracing::info!("{BASE_URL_ENV}: {url}");
    }
    for line in config.to_toml()?.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&config_path)?;

    let destination = match cli.command {
        Commands::Tui(_) => LogDestination::for_tui(config.log.file.clone()),
        Commands::Search(_) | Commands::Config(_) => LogDestination::Stdout,
    };
    init_tracing(&destination)?;

    match cli.command {
        Commands::Search(args) => run_search(&args, &config).await,
        Commands::Tui(args) => run_tui(args, &config).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(&config_path, &config),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_base_url_env_wins_over_config() {
        // Arrange
        let tmdb = TmdbConfig {
            base_url: Some(String::from("http://config.example/3")),
            ..TmdbConfig::default()
        };

        // Act
        let url = resolve_base_url(Some(String::from("http://env.example/3")), &tmdb).unwrap();

        // Assert
        assert_eq!(url.unwrap().as_str(), "http://env.example/3");
    }

    #[test]
    fn test_base_url_from_config() {
        // Arrange
        let tmdb = TmdbConfig {
            base_url: Some(String::from("http://config.example/3")),
            ..TmdbConfig::default()
        };

        // Act
        let url = resolve_base_url(Some(String::from("  ")), &tmdb).unwrap();

        // Assert
        assert_eq!(url.unwrap().as_str(), "http://config.example/3");
    }

    #[test]
    fn test_base_url_default() {
        // Arrange & Act
        let url = resolve_base_url(None, &TmdbConfig::default()).unwrap();

        // Assert
        assert!(url.is_none());
    }

    #[test]
    fn test_base_url_invalid() {
        // Arrange & Act
        let result = resolve_base_url(Some(String::from("not a url")), &TmdbConfig::default());

        // Assert
        assert!(result.unwrap_err().to_string().contains("invalid TMDB base URL"));
    }

    #[test]
    fn test_cli_parses_search() {
        // Arrange & Act
        let cli = Cli::try_parse_from([
            "filmgrid", "--dir", "/tmp/x", "search", "--query", "batman", "--page", "2",
        ])
        .unwrap();

        // Assert
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/x")));
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query, "batman");
        assert_eq!(args.page, 2);
    }

    #[test]
    fn test_cli_rejects_page_out_of_range() {
        // Arrange & Act
        let result = Cli::try_parse_from(["filmgrid", "search", "--query", "a", "--page", "501"]);

        // Assert
        assert!(result.is_err());
    }
}
