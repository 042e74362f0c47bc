//! Article browser: search and label filtering over the full result set.
//!
//! Both filters are order-preserving and compose with logical AND, so they can
//! be applied in either order with the same outcome.

use super::{ArticleCard, NO_ANALYSIS_MESSAGE, Style, distinct_labels, write_title};
use crate::models::ArticleRecord;
use crate::session::Session;
use crate::utils::title_case;
use serde::Serialize;
use std::fmt::Write;

/// Label filter value meaning "no label filter".
pub const ALL_LABELS: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleFilter {
    /// Case-insensitive substring searched in title and summary.
    pub search: Option<String>,
    /// Normalized label to keep, compared case-insensitively.
    pub label: Option<String>,
}

impl ArticleFilter {
    pub fn new(search: Option<String>, label: Option<String>) -> Self {
        Self { search, label }
    }

    pub fn set_search(&mut self, term: Option<String>) {
        self.search = term;
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// The active search term; empty terms do not filter.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// The active label, lower-cased; `All` (any case) does not filter.
    pub fn label_filter(&self) -> Option<String> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case(ALL_LABELS))
            .map(str::to_lowercase)
    }

    pub fn matches(&self, record: &ArticleRecord) -> bool {
        self.search_term().is_none_or(|t| matches_search(record, t))
            && self.label_filter().is_none_or(|l| matches_label(record, &l))
    }

    /// Records passing both filters, in their original order.
    pub fn apply<'a>(&self, records: &'a [ArticleRecord]) -> Vec<&'a ArticleRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Case-insensitive substring match on the title or the summary.
///
/// Fields are matched separately, so a term never matches across the
/// boundary between title and summary.
pub fn matches_search(record: &ArticleRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    [record.title.as_deref(), record.summary.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn matches_label(record: &ArticleRecord, label: &str) -> bool {
    record.normalized().label == label.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Browser {
    pub topic: String,
    pub total: usize,
    pub shown: usize,
    pub filter: ArticleFilter,
    /// `All` followed by the observed labels, title-cased.
    pub label_options: Vec<String>,
    pub cards: Vec<ArticleCard>,
}

impl Browser {
    pub fn build(session: &Session, filter: &ArticleFilter) -> Option<Self> {
        session.result()?;
        let records = session.results();
        let cards: Vec<ArticleCard> = filter
            .apply(records)
            .into_iter()
            .enumerate()
            .map(|(i, r)| ArticleCard::from_record(i + 1, r))
            .collect();

        let label_options = std::iter::once(ALL_LABELS.to_string())
            .chain(distinct_labels(records).iter().map(|l| title_case(l)))
            .collect();

        Some(Self {
            topic: session.topic().to_string(),
            total: records.len(),
            shown: cards.len(),
            filter: filter.clone(),
            label_options,
            cards,
        })
    }

    pub fn render(&self, style: &Style) -> String {
        let mut out = String::new();
        write_title(&mut out, style, "Article Summaries");

        if self.total == 0 {
            writeln!(out, "No articles found.").unwrap();
            return out;
        }
        writeln!(out, "Topic: {}", self.topic).unwrap();
        writeln!(out, "Total Articles: {}", self.total).unwrap();
        writeln!(
            out,
            "Search: {}   Sentiment: {}",
            self.filter.search_term().unwrap_or("-"),
            self.filter
                .label_filter()
                .map(|l| title_case(&l))
                .unwrap_or_else(|| ALL_LABELS.to_string()),
        )
        .unwrap();
        writeln!(out, "Sentiment options: {}", self.label_options.join(", ")).unwrap();
        writeln!(out, "\nShowing {} of {} articles", self.shown, self.total).unwrap();

        for card in &self.cards {
            writeln!(
                out,
                "\n┌ Article {}  {}",
                card.number,
                style.badge(&card.label, card.confidence, 3)
            )
            .unwrap();
            if let Some(title) = &card.title {
                writeln!(out, "│ Title: {title}").unwrap();
            }
            writeln!(
                out,
                "│ Summary: {}",
                card.summary.as_deref().unwrap_or("No summary available")
            )
            .unwrap();
            if let Some(link) = &card.link {
                writeln!(out, "│ Source: {link}").unwrap();
            }
            writeln!(out, "└").unwrap();
        }

        if self.cards.is_empty() {
            writeln!(out, "No articles match your search criteria.").unwrap();
        }
        out
    }
}

/// Render the browser for `session`, or the "analyze first" prompt.
pub fn render(session: &Session, filter: &ArticleFilter, style: &Style) -> String {
    match Browser::build(session, filter) {
        Some(view) => view.render(style),
        None => format!("{NO_ANALYSIS_MESSAGE}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;
    use crate::results::extract_results;
    use crate::session::tests::record;
    use serde_json::json;

    fn records() -> Vec<ArticleRecord> {
        vec![
            record("Rain helps crops", "Farmers cheer good news", json!({"label": "LABEL_1", "score": 0.9})),
            record("Drought", "Bad news for wheat", json!("negative")),
            record("Market update", "Prices hold steady", json!({"sentiment": "Neutral"})),
            record("News roundup", "Mixed signals", json!({"label": "LABEL_0", "score": 0.6})),
        ]
    }

    fn by_search<'a>(records: &[&'a ArticleRecord], term: &str) -> Vec<&'a ArticleRecord> {
        records.iter().copied().filter(|r| matches_search(r, term)).collect()
    }

    fn by_label<'a>(records: &[&'a ArticleRecord], label: &str) -> Vec<&'a ArticleRecord> {
        records.iter().copied().filter(|r| matches_label(r, label)).collect()
    }

    fn titles(found: &[&ArticleRecord]) -> Vec<String> {
        found.iter().filter_map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_end_to_end_label_filter() {
        let payload = json!({"results": [
            {"title": "A", "summary": "good news", "sentiment": {"label": "LABEL_1", "score": 0.9}},
            {"title": "B", "summary": "bad news", "sentiment": "negative"}
        ]});
        let records = extract_results(payload).unwrap();
        let filter = ArticleFilter::new(None, Some("Negative".into()));
        assert_eq!(titles(&filter.apply(&records)), vec!["B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_summary() {
        let records = records();
        let filter = ArticleFilter::new(Some("NEWS".into()), None);
        assert_eq!(
            titles(&filter.apply(&records)),
            vec!["Rain helps crops", "Drought", "News roundup"]
        );
        let filter = ArticleFilter::new(Some("market".into()), None);
        assert_eq!(titles(&filter.apply(&records)), vec!["Market update"]);
    }

    #[test]
    fn test_search_does_not_span_fields() {
        let r = record("abc", "def", json!("neutral"));
        assert!(!matches_search(&r, "cd"));
        assert!(matches_search(&r, "BC"));
    }

    #[test]
    fn test_filters_compose() {
        let records = records();
        let filter = ArticleFilter::new(Some("news".into()), Some("negative".into()));
        assert_eq!(titles(&filter.apply(&records)), vec!["Drought", "News roundup"]);
    }

    #[test]
    fn test_filters_commute_and_are_idempotent() {
        let records = records();
        let all: Vec<&ArticleRecord> = records.iter().collect();
        for term in ["news", "e", "zzz", ""] {
            for label in ["positive", "negative", "neutral", "mixed"] {
                let search_first = by_label(&by_search(&all, term), label);
                let label_first = by_search(&by_label(&all, label), term);
                assert_eq!(search_first, label_first, "term={term} label={label}");

                let twice = by_search(&by_search(&all, term), term);
                assert_eq!(twice, by_search(&all, term));
                let twice = by_label(&by_label(&all, label), label);
                assert_eq!(twice, by_label(&all, label));
            }
        }
    }

    #[test]
    fn test_apply_keeps_exactly_the_matching_records() {
        let records = records();
        let filters = [
            ArticleFilter::new(Some("news".into()), None),
            ArticleFilter::new(None, Some("NEGATIVE".into())),
            ArticleFilter::new(Some("e".into()), Some("neutral".into())),
            ArticleFilter::new(Some("zzz".into()), Some("All".into())),
        ];
        for filter in filters {
            let expected: Vec<&ArticleRecord> =
                records.iter().filter(|r| filter.matches(r)).collect();
            assert_eq!(filter.apply(&records), expected, "{filter:?}");
        }
        let filter = ArticleFilter::new(Some("news".into()), Some("negative".into()));
        assert!(filter.matches(&records[1]));
        assert!(!filter.matches(&records[0]));
    }

    #[test]
    fn test_all_and_empty_mean_no_filter() {
        let records = records();
        for filter in [
            ArticleFilter::default(),
            ArticleFilter::new(Some(String::new()), Some("ALL".into())),
            ArticleFilter::new(None, Some("  ".into())),
        ] {
            assert!(filter.search_term().is_none());
            assert!(filter.label_filter().is_none());
            assert_eq!(filter.apply(&records).len(), records.len());
        }
    }

    #[test]
    fn test_browser_view() {
        let session = Session::with_result(AnalysisResult::new("Farming", records()));
        let view = Browser::build(&session, &ArticleFilter::new(None, Some("Negative".into()))).unwrap();
        assert_eq!(view.total, 4);
        assert_eq!(view.shown, 2);
        assert_eq!(view.cards[0].number, 1);
        assert_eq!(view.cards[1].number, 2);
        assert_eq!(view.label_options, vec!["All", "Positive", "Negative", "Neutral"]);

        let text = view.render(&Style::PLAIN);
        assert!(text.contains("Showing 2 of 4 articles"));
        assert!(text.contains("[Negative · 0.600]"));
    }

    #[test]
    fn test_no_matches_message() {
        let session = Session::with_result(AnalysisResult::new("Farming", records()));
        let text = render(&session, &ArticleFilter::new(Some("zzz".into()), None), &Style::PLAIN);
        assert!(text.contains("Showing 0 of 4 articles"));
        assert!(text.contains("No articles match your search criteria."));
    }

    #[test]
    fn test_card_fallbacks() {
        let session = Session::with_result(AnalysisResult::new("AI", vec![ArticleRecord::default()]));
        let text = render(&session, &ArticleFilter::default(), &Style::PLAIN);
        assert!(text.contains("No summary available"));
        assert!(!text.contains("Title:"));
        assert!(text.contains("[Unknown · 0.000]"));
    }

    #[test]
    fn test_empty_and_missing_states() {
        let filter = ArticleFilter::default();
        assert!(render(&Session::new(), &filter, &Style::PLAIN).contains("Please analyze a topic first"));
        let empty = Session::with_result(AnalysisResult::new("AI", vec![]));
        assert!(render(&empty, &filter, &Style::PLAIN).contains("No articles found."));
    }
}
