#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! News card search types.
//!
//! These types describe the searchable snapshot of the site's news cards
//! (one [`SearchRecord`] per card), a validated [`SearchQuery`], and the
//! results the index hands back to the page: [`SearchMatch`] for "which
//! cards matched" and [`AnnotatedRecord`] for the highlighted copy that is
//! rendered in the results panel.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Minimum number of characters (after trimming) a search term must have.
pub const MIN_TERM_CHARS: usize = 2;

/// Message shown to the reader when the search term is too short.
pub const TERM_TOO_SHORT_MESSAGE: &str = "Por favor, digite pelo menos 2 caracteres para buscar.";

/// Opaque, stable identifier of a record within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<usize> for RecordId {
    fn from(position: usize) -> Self {
        Self(position.to_string())
    }
}

/// The text content of one news card.
///
/// All fields keep their original casing; case folding happens at query
/// time so results can be displayed exactly as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// Stable identifier (card position or an explicit key).
    pub id: RecordId,
    /// Card headline.
    pub title: String,
    /// Card summary paragraph.
    pub body: String,
    /// Free-form tag text, matched as a raw substring and never displayed.
    #[serde(default)]
    pub keywords: String,
}

impl SearchRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        body: impl Into<String>,
        keywords: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            keywords: keywords.into(),
        }
    }

    /// Returns the text of the given field.
    #[must_use]
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Title => &self.title,
            RecordField::Body => &self.body,
            RecordField::Keywords => &self.keywords,
        }
    }
}

/// A searchable field of a [`SearchRecord`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordField {
    /// The card headline.
    Title,
    /// The card summary paragraph.
    Body,
    /// The card's keyword tags.
    Keywords,
}

impl RecordField {
    /// Fields in the order they are checked for a match.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Keywords, Self::Title, Self::Body]
    }

    /// Whether occurrences in this field are highlighted for display.
    #[must_use]
    pub const fn is_displayed(self) -> bool {
        !matches!(self, Self::Keywords)
    }
}

/// Where a query term occurs within a record.
///
/// `offset` and `len` are byte positions into the original (unfolded)
/// field text, always on `char` boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpan {
    /// Field containing the occurrence.
    pub field: RecordField,
    /// Byte offset of the occurrence.
    pub offset: usize,
    /// Byte length of the occurrence.
    pub len: usize,
}

impl MatchSpan {
    /// Byte offset one past the end of the occurrence.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Folds text for case-insensitive comparison.
///
/// Lower-cases each `char` independently, with no locale rules and no
/// Unicode normalization. Queries and record text are both folded with
/// this function so that comparison is symmetric.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A validated search term.
///
/// The only way to build one is [`SearchQuery::parse`], so an index never
/// sees a term shorter than [`MIN_TERM_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    /// Trims and case-folds raw user input into a query.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TermTooShort`] if the trimmed input has
    /// fewer than [`MIN_TERM_CHARS`] characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();

        if len < MIN_TERM_CHARS {
            return Err(ValidationError::TermTooShort {
                min: MIN_TERM_CHARS,
                len,
            });
        }

        Ok(Self {
            term: fold_case(trimmed),
        })
    }

    /// The folded term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.term)
    }
}

/// Rejected search input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The trimmed term is shorter than the minimum length.
    #[error("term too short: {len} character(s), at least {min} required")]
    TermTooShort {
        /// Required minimum length.
        min: usize,
        /// Length of the trimmed input.
        len: usize,
    },
}

impl ValidationError {
    /// The blocking message shown to the reader.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::TermTooShort { .. } => TERM_TOO_SHORT_MESSAGE,
        }
    }
}

/// One record matched by a query, with every occurrence of the term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch<'a> {
    /// The matched record, borrowed from the index snapshot.
    pub record: &'a SearchRecord,
    /// Non-overlapping occurrences, grouped by field then ordered by offset.
    pub spans: Vec<MatchSpan>,
}

impl SearchMatch<'_> {
    /// Occurrences within a single field.
    pub fn spans_in(&self, field: RecordField) -> impl Iterator<Item = &MatchSpan> {
        self.spans.iter().filter(move |span| span.field == field)
    }

    /// Whether the term occurs in the given field.
    #[must_use]
    pub fn matched(&self, field: RecordField) -> bool {
        self.spans_in(field).next().is_some()
    }
}

/// A highlighted copy of a record's displayable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRecord {
    /// Identifier of the source record.
    pub id: RecordId,
    /// Title with every occurrence wrapped in the highlight marker.
    pub title: String,
    /// Body with every occurrence wrapped in the highlight marker.
    pub body: String,
    /// Occurrences in the original title.
    pub title_spans: Vec<MatchSpan>,
    /// Occurrences in the original body.
    pub body_spans: Vec<MatchSpan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_folds() {
        let query = SearchQuery::parse("  JuNiNa \t").unwrap();
        assert_eq!(query.term(), "junina");
    }

    #[test]
    fn parse_rejects_short_terms() {
        for raw in ["", " ", "a", "  b  ", "\té\n"] {
            let err = SearchQuery::parse(raw).unwrap_err();
            assert!(
                matches!(err, ValidationError::TermTooShort { min: 2, .. }),
                "{raw:?} should be rejected"
            );
            assert_eq!(err.user_message(), TERM_TOO_SHORT_MESSAGE);
        }
    }

    #[test]
    fn parse_counts_chars_not_bytes() {
        // "é" is two bytes but one character.
        assert!(SearchQuery::parse("é").is_err());
        assert_eq!(SearchQuery::parse("éa").unwrap().term(), "éa");
    }

    #[test]
    fn fold_case_is_per_char() {
        assert_eq!(fold_case("Comemoração"), "comemoração");
        assert_eq!(fold_case("ΣΑΣ"), "σασ");
    }

    #[test]
    fn record_field_round_trips_through_strings() {
        assert_eq!(RecordField::Keywords.to_string(), "keywords");
        assert_eq!("body".parse::<RecordField>().unwrap(), RecordField::Body);
        assert!(!RecordField::Keywords.is_displayed());
        assert!(RecordField::Title.is_displayed());
    }

    #[test]
    fn record_deserializes_without_keywords() {
        let record: SearchRecord = serde_json::from_value(serde_json::json!({
            "id": "7",
            "title": "Feira de Ciências",
            "body": "Projetos dos alunos"
        }))
        .unwrap();
        assert_eq!(record.id, RecordId::from(7_usize));
        assert!(record.keywords.is_empty());
    }

    #[test]
    fn search_match_filters_spans_by_field() {
        let record = SearchRecord::new(0_usize, "Festa", "Festa na escola", "festa");
        let found = SearchMatch {
            record: &record,
            spans: vec![
                MatchSpan {
                    field: RecordField::Keywords,
                    offset: 0,
                    len: 5,
                },
                MatchSpan {
                    field: RecordField::Body,
                    offset: 0,
                    len: 5,
                },
            ],
        };
        assert!(found.matched(RecordField::Body));
        assert!(!found.matched(RecordField::Title));
        assert_eq!(found.spans_in(RecordField::Keywords).count(), 1);
    }
}
