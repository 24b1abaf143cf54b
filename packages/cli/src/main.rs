#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the Gazeta core.
//!
//! ```text
//! gazeta search --records index.html junina
//! gazeta filter --records index.html esporte
//! gazeta weather [--lat -23.31 --lon -51.16]
//! gazeta banner
//! ```
//!
//! Stands in for the page's UI controller: it loads the news cards, hands
//! the reader's input to the search index or the weather fetcher, and
//! prints what the page would render.

mod banner;
mod search;
mod weather;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gazeta_cli_utils::site::{DEFAULT_SITE_CONFIG_PATH, SiteConfig, current_year};

#[derive(Parser)]
#[command(
    name = "gazeta",
    about = "Search news cards and check the weather widget"
)]
struct Cli {
    /// Path to the site configuration file.
    #[arg(long, default_value = DEFAULT_SITE_CONFIG_PATH)]
    site_config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search news cards and print highlighted results
    Search {
        /// Page markup (.html) or record array (.json) to search
        #[arg(long)]
        records: PathBuf,
        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Highlight markup
        #[arg(long, value_enum, default_value = "mark")]
        marker: MarkerArg,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Search term (at least 2 characters)
        term: String,
    },
    /// List news cards selected by a keyword filter button
    Filter {
        /// Page markup (.html) or record array (.json) to filter
        #[arg(long)]
        records: PathBuf,
        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Keyword to filter by, or "all"
        keyword: String,
    },
    /// Fetch the current weather
    Weather {
        /// Latitude reported by geolocation; without it the fallback is used
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude reported by geolocation
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// API key (defaults to the configured environment variable)
        #[arg(long)]
        api_key: Option<String>,
        /// Weather provider configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the display state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the edition banner, footer year and page settings
    Banner,
}

/// Record file format.
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Json,
}

impl From<FormatArg> for gazeta_search::loader::RecordFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => Self::Html,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Highlight markup style.
#[derive(Clone, Copy, ValueEnum)]
enum MarkerArg {
    /// `<mark>…</mark>`
    Mark,
    /// `<span class="search-highlight">…</span>`
    Span,
    /// `**…**`, no HTML escaping
    Plain,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    gazeta_cli_utils::init_logger();
    let cli = Cli::parse();

    let site = SiteConfig::load_or_default(&cli.site_config)?;

    match cli.command {
        Commands::Search {
            records,
            format,
            marker,
            json,
            term,
        } => search::run_search(&records, format.map(Into::into), marker, json, &term)?,
        Commands::Filter {
            records,
            format,
            keyword,
        } => search::run_filter(&records, format.map(Into::into), &keyword, &site)?,
        Commands::Weather {
            lat,
            lon,
            api_key,
            config,
            json,
        } => {
            let coordinates = lat.zip(lon);
            let config = config.or_else(|| site.weather_config.clone());
            weather::run(coordinates, api_key, config.as_deref(), json).await?;
        }
        Commands::Banner => {
            for line in banner::banner_lines(&site, current_year()) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
