//! `search` and `filter` subcommands.

use std::path::Path;

use gazeta_cli_utils::site::SiteConfig;
use gazeta_search::highlight::HighlightMarker;
use gazeta_search::loader::{self, RecordFormat};
use gazeta_search::{KeywordFilter, SearchIndex, SearchOutcome};

use crate::MarkerArg;

/// Exit status when the search term is rejected.
const INVALID_TERM_EXIT_CODE: i32 = 2;

/// Class the page styles highlighted spans with.
const HIGHLIGHT_CLASS: &str = "search-highlight";

fn marker(arg: MarkerArg) -> HighlightMarker {
    match arg {
        MarkerArg::Mark => HighlightMarker::mark(),
        MarkerArg::Span => HighlightMarker::span_class(HIGHLIGHT_CLASS),
        MarkerArg::Plain => HighlightMarker::plain("**", "**"),
    }
}

fn load_index(
    records: &Path,
    format: Option<RecordFormat>,
) -> Result<SearchIndex, Box<dyn std::error::Error>> {
    let records = loader::from_file(records, format)?;
    Ok(SearchIndex::build(records))
}

/// The results panel as JSON: the heading plus every highlighted card.
fn results_json(outcome: &SearchOutcome<'_>, marker: &HighlightMarker) -> serde_json::Value {
    serde_json::json!({
        "title": outcome.title(),
        "results": outcome.highlighted(marker),
    })
}

/// One line per card left visible by `keyword`, with its fade-in delay.
fn filter_lines(index: &SearchIndex, keyword: &str, site: &SiteConfig) -> Vec<String> {
    let Ok(filter) = keyword.parse::<KeywordFilter>();

    let visible = index.filter(&filter);
    log::info!("{} of {} card(s) visible", visible.len(), index.len());

    visible
        .iter()
        .zip(0_u64..)
        .map(|(record, position)| {
            format!(
                "[{}] {} (+{} ms)",
                record.id,
                record.title,
                site.card_animation_delay(position).as_millis()
            )
        })
        .collect()
}

/// Runs a search and prints the results title followed by every matching
/// card with the term highlighted.
///
/// A term that is too short prints the reader-facing message and exits
/// with status 2.
pub fn run_search(
    records: &Path,
    format: Option<RecordFormat>,
    marker_arg: MarkerArg,
    json: bool,
    term: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(records, format)?;

    let outcome = match index.search_str(term) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::debug!("Rejected search term {term:?}: {e}");
            eprintln!("{}", e.user_message());
            std::process::exit(INVALID_TERM_EXIT_CODE);
        }
    };

    let marker = marker(marker_arg);

    if json {
        let body = results_json(&outcome, &marker);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", outcome.title());
    for record in &outcome.highlighted(&marker) {
        println!();
        println!("[{}] {}", record.id, record.title);
        println!("    {}", record.body);
    }

    Ok(())
}

/// Lists the cards a keyword filter button leaves visible, in the order
/// they fade in.
pub fn run_filter(
    records: &Path,
    format: Option<RecordFormat>,
    keyword: &str,
    site: &SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(records, format)?;

    for line in filter_lines(&index, keyword, site) {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use gazeta_search::SearchRecord;

    use super::*;

    fn index() -> SearchIndex {
        SearchIndex::build(vec![
            SearchRecord::new("festa", "Festa Junina", "Comemoração na escola", "festa,escola"),
            SearchRecord::new("jogos", "Jogos Internos", "A festa do esporte", "esporte"),
            SearchRecord::new("feira", "Feira de Ciências", "Projetos", "ciencia,escola"),
        ])
    }

    #[test]
    fn marker_args_select_site_markup() {
        assert_eq!(marker(MarkerArg::Mark), HighlightMarker::mark());
        assert_eq!(
            marker(MarkerArg::Span),
            HighlightMarker::span_class("search-highlight")
        );
        assert_eq!(marker(MarkerArg::Plain), HighlightMarker::plain("**", "**"));
    }

    #[test]
    fn results_json_has_title_and_highlighted_cards() {
        let index = index();
        let outcome = index.search_str("festa").unwrap();
        let body = results_json(&outcome, &marker(MarkerArg::Mark));

        assert_eq!(body["title"], "2 resultado(s) para \"festa\"");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "festa");
        assert_eq!(results[0]["title"], "<mark>Festa</mark> Junina");
        assert_eq!(results[1]["body"], "A <mark>festa</mark> do esporte");
    }

    #[test]
    fn all_filter_lists_every_card_with_staggered_delays() {
        let lines = filter_lines(&index(), "all", &SiteConfig::default());
        assert_eq!(
            lines,
            vec![
                "[festa] Festa Junina (+0 ms)",
                "[jogos] Jogos Internos (+100 ms)",
                "[feira] Feira de Ciências (+200 ms)",
            ]
        );
    }

    #[test]
    fn keyword_filter_restarts_the_stagger() {
        let lines = filter_lines(&index(), "escola", &SiteConfig::default());
        assert_eq!(
            lines,
            vec![
                "[festa] Festa Junina (+0 ms)",
                "[feira] Feira de Ciências (+100 ms)",
            ]
        );
    }
}
