//! Highlighted copies of matched records.

use gazeta_search_models::{AnnotatedRecord, MatchSpan, RecordField, SearchRecord};

use crate::matcher::find_spans;

/// Markup wrapped around each occurrence of the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    open: String,
    close: String,
    escape_html: bool,
}

impl HighlightMarker {
    /// `<mark>` / `</mark>`, escaping the record text as HTML.
    #[must_use]
    pub fn mark() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
            escape_html: true,
        }
    }

    /// `<span class="{class}">` / `</span>`, escaping the record text as
    /// HTML. `span_class("search-highlight")` produces the site's
    /// stylesheet hook.
    #[must_use]
    pub fn span_class(class: &str) -> Self {
        Self {
            open: format!("<span class=\"{}\">", escape_html(class)),
            close: "</span>".to_string(),
            escape_html: true,
        }
    }

    /// Arbitrary delimiters with the record text copied verbatim.
    #[must_use]
    pub fn plain(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape_html: false,
        }
    }

    fn push_text(&self, out: &mut String, text: &str) {
        if self.escape_html {
            out.push_str(&escape_html(text));
        } else {
            out.push_str(text);
        }
    }
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self::mark()
    }
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders `text` with every span wrapped in `marker`.
///
/// `spans` must be ordered, non-overlapping and on `char` boundaries of
/// `text`, which is what [`find_spans`] produces.
#[must_use]
pub fn render(text: &str, spans: &[MatchSpan], marker: &HighlightMarker) -> String {
    let mut out =
        String::with_capacity(text.len() + spans.len() * (marker.open.len() + marker.close.len()));
    let mut cursor = 0;

    for span in spans {
        marker.push_text(&mut out, &text[cursor..span.offset]);
        out.push_str(&marker.open);
        marker.push_text(&mut out, &text[span.offset..span.end()]);
        out.push_str(&marker.close);
        cursor = span.end();
    }

    marker.push_text(&mut out, &text[cursor..]);
    out
}

/// Returns a copy of the record's title and body with every
/// case-insensitive occurrence of `term` wrapped in `marker`.
///
/// The record itself is left untouched and `keywords` are never
/// highlighted. An empty term yields an unmarked copy.
#[must_use]
pub fn highlight_record(
    record: &SearchRecord,
    term: &str,
    marker: &HighlightMarker,
) -> AnnotatedRecord {
    let title_spans = find_spans(&record.title, term, RecordField::Title);
    let body_spans = find_spans(&record.body, term, RecordField::Body);

    AnnotatedRecord {
        id: record.id.clone(),
        title: render(&record.title, &title_spans, marker),
        body: render(&record.body, &body_spans, marker),
        title_spans,
        body_spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn festa() -> SearchRecord {
        SearchRecord::new(
            0_usize,
            "Festa Junina",
            "Comemoração na escola",
            "festa,junina,escola",
        )
    }

    #[test]
    fn wraps_title_occurrence_in_mark() {
        let annotated = highlight_record(&festa(), "junina", &HighlightMarker::mark());
        assert_eq!(annotated.title, "Festa <mark>Junina</mark>");
        assert_eq!(annotated.body, "Comemoração na escola");
        assert!(annotated.body_spans.is_empty());
    }

    #[test]
    fn span_class_marker_matches_site_markup() {
        let marker = HighlightMarker::span_class("search-highlight");
        let annotated = highlight_record(&festa(), "ESCOLA", &marker);
        assert_eq!(
            annotated.body,
            "Comemoração na <span class=\"search-highlight\">escola</span>"
        );
    }

    #[test]
    fn keywords_are_never_highlighted() {
        let record = SearchRecord::new(1_usize, "Olimpíadas", "Resultados", "esporte");
        let annotated = highlight_record(&record, "esporte", &HighlightMarker::mark());
        assert_eq!(annotated.title, "Olimpíadas");
        assert_eq!(annotated.body, "Resultados");
        assert!(annotated.title_spans.is_empty());
        assert!(annotated.body_spans.is_empty());
    }

    #[test]
    fn pattern_metacharacters_are_matched_literally() {
        let record = SearchRecord::new(2_usize, "Teste (test) a+b", "aab (test)", "");
        let marker = HighlightMarker::plain("[", "]");

        let plus = highlight_record(&record, "a+b", &marker);
        assert_eq!(plus.title, "Teste (test) [a+b]");
        assert_eq!(plus.body, "aab (test)");

        let parens = highlight_record(&record, "(test)", &marker);
        assert_eq!(parens.title, "Teste [(test)] a+b");
        assert_eq!(parens.body, "aab [(test)]");
    }

    #[test]
    fn span_placement_is_stable_across_runs() {
        let record = festa();
        let first = highlight_record(&record, "Festa", &HighlightMarker::mark());
        let second = highlight_record(&record, "Festa", &HighlightMarker::mark());
        assert_eq!(first, second);
        assert_eq!(record, festa());
    }

    #[test]
    fn html_markers_escape_record_text() {
        let record = SearchRecord::new(3_usize, "<b>Festa</b> & cia", "", "");
        let annotated = highlight_record(&record, "festa", &HighlightMarker::mark());
        assert_eq!(
            annotated.title,
            "&lt;b&gt;<mark>Festa</mark>&lt;/b&gt; &amp; cia"
        );
    }

    #[test]
    fn empty_term_leaves_copy_unmarked() {
        let annotated = highlight_record(&festa(), "", &HighlightMarker::mark());
        assert_eq!(annotated.title, "Festa Junina");
        assert!(annotated.title_spans.is_empty());
    }
}
