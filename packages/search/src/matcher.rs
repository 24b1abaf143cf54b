//! Literal, case-insensitive substring matching.
//!
//! Text is folded with [`fold_case`] and every folded byte remembers the
//! byte offset of the original `char` it came from. Matches are found in
//! the folded text with plain substring search and mapped back, so spans
//! always point at the original casing even when lower-casing changes the
//! byte length of a character (e.g. `'İ'` folds to two chars).
//!
//! No pattern engine is involved: terms like `"a+b"` or `"(test)"` are
//! compared byte-for-byte.

use gazeta_search_models::{MatchSpan, RecordField, fold_case};

/// A field's text folded for comparison.
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    original: &'a str,
    folded: String,
    /// For each byte of `folded`, the offset of the source `char` in `original`.
    origin: Vec<usize>,
}

impl<'a> FoldedText<'a> {
    /// Folds `original`, recording the offset map.
    #[must_use]
    pub fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());

        for (offset, ch) in original.char_indices() {
            for lower in ch.to_lowercase() {
                folded.push(lower);
                origin.extend(std::iter::repeat_n(offset, lower.len_utf8()));
            }
        }

        Self {
            original,
            folded,
            origin,
        }
    }

    /// Whether the already-folded `term` occurs anywhere in the text.
    #[must_use]
    pub fn contains(&self, folded_term: &str) -> bool {
        !folded_term.is_empty() && self.folded.contains(folded_term)
    }

    /// Every non-overlapping occurrence of the already-folded `term`,
    /// scanning left to right.
    #[must_use]
    pub fn find_all(&self, folded_term: &str, field: RecordField) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        if folded_term.is_empty() {
            return spans;
        }

        let mut cursor = 0;
        let mut last_end = 0;

        while let Some(pos) = self.folded[cursor..].find(folded_term) {
            let start = cursor + pos;
            let end = start + folded_term.len();

            let offset = self.origin[start];
            let original_end = self.original_char_end(end - 1);

            // Two folded hits can land inside the same expanded source char.
            if offset >= last_end {
                spans.push(MatchSpan {
                    field,
                    offset,
                    len: original_end - offset,
                });
                last_end = original_end;
            }

            cursor = end;
        }

        spans
    }

    /// End offset (exclusive) of the original `char` that produced the
    /// folded byte at `folded_byte`.
    fn original_char_end(&self, folded_byte: usize) -> usize {
        let start = self.origin[folded_byte];
        start
            + self.original[start..]
                .chars()
                .next()
                .map_or(0, char::len_utf8)
    }
}

/// Finds every occurrence of `term` in `text`, folding both sides.
#[must_use]
pub fn find_spans(text: &str, term: &str, field: RecordField) -> Vec<MatchSpan> {
    FoldedText::new(text).find_all(&fold_case(term), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'t>(text: &'t str, spans: &[MatchSpan]) -> Vec<&'t str> {
        spans.iter().map(|s| &text[s.offset..s.end()]).collect()
    }

    #[test]
    fn finds_case_insensitive_occurrences() {
        let text = "Junina, JUNINA e junina";
        let spans = find_spans(text, "junina", RecordField::Title);
        assert_eq!(slices(text, &spans), vec!["Junina", "JUNINA", "junina"]);
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let text = "aaaa";
        let spans = find_spans(text, "aa", RecordField::Body);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].offset, 0);
        assert_eq!(spans[1].offset, 2);
    }

    #[test]
    fn metacharacters_are_literal() {
        let text = "Soma a+b e (test) aab";
        let plus = find_spans(text, "a+b", RecordField::Body);
        assert_eq!(slices(text, &plus), vec!["a+b"]);

        let parens = find_spans(text, "(TEST)", RecordField::Body);
        assert_eq!(slices(text, &parens), vec!["(test)"]);

        assert!(find_spans(text, ".*", RecordField::Body).is_empty());
    }

    #[test]
    fn offsets_point_at_original_text_when_folding_changes_length() {
        // 'İ' (2 bytes) folds to "i\u{307}" (3 bytes).
        let text = "İstanbul Festa";
        let spans = find_spans(text, "festa", RecordField::Title);
        assert_eq!(slices(text, &spans), vec!["Festa"]);
    }

    #[test]
    fn multibyte_matches_keep_char_boundaries() {
        let text = "COMEMORAÇÃO na escola";
        let spans = find_spans(text, "comemoração", RecordField::Body);
        assert_eq!(slices(text, &spans), vec!["COMEMORAÇÃO"]);
    }

    #[test]
    fn empty_term_matches_nothing() {
        assert!(find_spans("qualquer", "", RecordField::Title).is_empty());
        assert!(!FoldedText::new("qualquer").contains(""));
    }
}
