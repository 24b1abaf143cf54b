#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-page search over the site's news cards.
//!
//! A [`SearchIndex`] is an immutable snapshot of [`SearchRecord`]s, built
//! once from the page (see [`loader`]) and rebuilt whenever the cards
//! change. Queries are literal, case-insensitive substring checks against
//! the keywords, title and body of every card; results keep page order.
//! Matched cards are rendered through [`highlight`], which wraps every
//! occurrence of the term without treating it as a pattern.

pub mod highlight;
pub mod loader;
pub mod matcher;

use std::convert::Infallible;
use std::str::FromStr;

pub use gazeta_search_models::{
    AnnotatedRecord, MatchSpan, RecordField, RecordId, SearchMatch, SearchQuery, SearchRecord,
    ValidationError,
};

use highlight::{HighlightMarker, highlight_record};
use matcher::FoldedText;

/// Immutable, ordered snapshot of searchable records.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Stores the records as-is, preserving their order and casing.
    #[must_use]
    pub fn build(records: Vec<SearchRecord>) -> Self {
        log::debug!("Built search index with {} record(s)", records.len());
        Self { records }
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in original order.
    #[must_use]
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&SearchRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Returns every record whose keywords, title or body contain the
    /// query term, in original order.
    ///
    /// Each record appears at most once, carrying the spans of every field
    /// that matched. An empty index or no matches yields an empty `Vec`.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchMatch<'_>> {
        let term = query.term();

        let matches: Vec<SearchMatch<'_>> = self
            .records
            .iter()
            .filter_map(|record| {
                let spans: Vec<MatchSpan> = RecordField::all()
                    .iter()
                    .flat_map(|&field| FoldedText::new(record.field(field)).find_all(term, field))
                    .collect();

                (!spans.is_empty()).then_some(SearchMatch { record, spans })
            })
            .collect();

        log::debug!(
            "Search for {term:?} matched {}/{} record(s)",
            matches.len(),
            self.records.len()
        );

        matches
    }

    /// Validates raw reader input and runs the search.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TermTooShort`] if the trimmed input is
    /// shorter than two characters; the index is not consulted.
    pub fn search_str(&self, raw: &str) -> Result<SearchOutcome<'_>, ValidationError> {
        let query = SearchQuery::parse(raw)?;
        let matches = self.search(&query);
        Ok(SearchOutcome { query, matches })
    }

    /// Returns a highlighted copy of `record`'s title and body.
    ///
    /// See [`highlight_record`].
    #[must_use]
    pub fn highlight(
        record: &SearchRecord,
        term: &str,
        marker: &HighlightMarker,
    ) -> AnnotatedRecord {
        highlight_record(record, term, marker)
    }

    /// Returns the records selected by a keyword filter button.
    ///
    /// Unlike [`Self::search`], keyword filtering compares the raw tag text
    /// case-sensitively.
    #[must_use]
    pub fn filter(&self, filter: &KeywordFilter) -> Vec<&SearchRecord> {
        match filter {
            KeywordFilter::All => self.records.iter().collect(),
            KeywordFilter::Keyword(keyword) => self
                .records
                .iter()
                .filter(|record| record.keywords.contains(keyword.as_str()))
                .collect(),
        }
    }
}

/// Selection made by a keyword filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordFilter {
    /// Show every record.
    All,
    /// Show records whose keywords contain this text.
    Keyword(String),
}

impl FromStr for KeywordFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            Self::All
        } else {
            Self::Keyword(s.to_string())
        })
    }
}

/// The result of a validated search, ready to render.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    /// The validated query.
    pub query: SearchQuery,
    /// Matched records in original order.
    pub matches: Vec<SearchMatch<'a>>,
}

impl SearchOutcome<'_> {
    /// Heading shown above the results panel.
    #[must_use]
    pub fn title(&self) -> String {
        if self.matches.is_empty() {
            format!("Nenhum resultado encontrado para \"{}\"", self.query)
        } else {
            format!(
                "{} resultado(s) para \"{}\"",
                self.matches.len(),
                self.query
            )
        }
    }

    /// Highlighted copies of every matched record.
    #[must_use]
    pub fn highlighted(&self, marker: &HighlightMarker) -> Vec<AnnotatedRecord> {
        self.matches
            .iter()
            .map(|found| highlight_record(found.record, self.query.term(), marker))
            .collect()
    }
}
