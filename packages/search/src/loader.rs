//! Builds record snapshots from page markup or JSON.
//!
//! The site renders each article teaser as a `.news-card` element with the
//! headline in an `<h3>`, the summary in a `<p>`, and its tags in a
//! `data-keywords` attribute:
//!
//! ```html
//! <article class="news-card" data-keywords="festa,junina,escola">
//!   <h3>Festa Junina</h3>
//!   <p>Comemoração na escola</p>
//! </article>
//! ```

use std::path::Path;

use gazeta_search_models::{RecordId, SearchRecord};
use scraper::{ElementRef, Html, Selector};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// CSS selector for a news card.
pub const CARD_SELECTOR: &str = ".news-card";
/// CSS selector for the card headline.
pub const TITLE_SELECTOR: &str = "h3";
/// CSS selector for the card summary.
pub const BODY_SELECTOR: &str = "p";

/// Errors from loading records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A CSS selector failed to parse.
    #[error("Selector error: {0}")]
    Selector(String),

    /// JSON input was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input format of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RecordFormat {
    /// Page markup containing `.news-card` elements.
    Html,
    /// A JSON array of records.
    Json,
}

impl RecordFormat {
    /// Guesses the format from a file extension, defaulting to HTML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Html,
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, LoadError> {
    Selector::parse(selector)
        .map_err(|e| LoadError::Selector(format!("invalid CSS selector '{selector}': {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Extracts one record per `.news-card` element, in document order.
///
/// The record id is the card's `data-id` attribute, or its position among
/// the cards when absent. Missing headline, summary or keywords become
/// empty strings.
///
/// # Errors
///
/// Returns [`LoadError::Selector`] if a built-in selector fails to parse.
pub fn from_html(html: &str) -> Result<Vec<SearchRecord>, LoadError> {
    let document = Html::parse_document(html);

    let card_sel = parse_selector(CARD_SELECTOR)?;
    let title_sel = parse_selector(TITLE_SELECTOR)?;
    let body_sel = parse_selector(BODY_SELECTOR)?;

    let records: Vec<SearchRecord> = document
        .select(&card_sel)
        .enumerate()
        .map(|(position, card)| {
            let id = card
                .value()
                .attr("data-id")
                .map_or_else(|| RecordId::from(position), RecordId::from);
            let title = card
                .select(&title_sel)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let body = card
                .select(&body_sel)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let keywords = card.value().attr("data-keywords").unwrap_or_default();

            SearchRecord::new(id, title, body, keywords)
        })
        .collect();

    log::debug!("Extracted {} news card(s) from markup", records.len());

    Ok(records)
}

/// Parses a JSON array of records.
///
/// # Errors
///
/// Returns [`LoadError::Json`] if the input is not a valid record array.
pub fn from_json(json: &str) -> Result<Vec<SearchRecord>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads records from a file, guessing the format from its extension
/// unless one is given.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn from_file(path: &Path, format: Option<RecordFormat>) -> Result<Vec<SearchRecord>, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let format = format.unwrap_or_else(|| RecordFormat::from_path(path));

    log::info!("Loading records from {} as {format}", path.display());

    match format {
        RecordFormat::Html => from_html(&contents),
        RecordFormat::Json => from_json(&contents),
    }
}
