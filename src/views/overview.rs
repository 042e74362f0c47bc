//! Overview: headline numbers and a preview of the first few records.

use super::{ArticleCard, LabelCount, NO_ANALYSIS_MESSAGE, Style, label_counts, write_title};
use crate::sentiment::{NEGATIVE, NEUTRAL, POSITIVE};
use crate::session::Session;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub topic: String,
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Every observed label, most frequent first.
    pub label_counts: Vec<LabelCount>,
    pub preview: Vec<ArticleCard>,
    /// Records not included in the preview.
    pub remaining: usize,
}

impl Overview {
    /// Build the overview, or `None` before the first analysis.
    pub fn build(session: &Session, preview_count: usize) -> Option<Self> {
        session.result()?;
        let records = session.results();
        let label_counts = label_counts(records);
        let count_of = |label: &str| {
            label_counts
                .iter()
                .find(|c| c.label == label)
                .map_or(0, |c| c.count)
        };

        let preview: Vec<ArticleCard> = records
            .iter()
            .take(preview_count)
            .enumerate()
            .map(|(i, r)| ArticleCard::from_record(i + 1, r))
            .collect();

        Some(Self {
            topic: session.topic().to_string(),
            total: records.len(),
            positive: count_of(POSITIVE),
            negative: count_of(NEGATIVE),
            neutral: count_of(NEUTRAL),
            remaining: records.len() - preview.len(),
            label_counts,
            preview,
        })
    }

    pub fn render(&self, style: &Style) -> String {
        let mut out = String::new();
        write_title(&mut out, style, &format!("Quick Overview - {}", self.topic));

        if self.total == 0 {
            writeln!(out, "No results found for this topic.").unwrap();
            return out;
        }

        writeln!(
            out,
            "Total Articles: {}   {}: {}   {}: {}   {}: {}",
            self.total,
            style.tint(POSITIVE, "Positive"),
            self.positive,
            style.tint(NEGATIVE, "Negative"),
            self.negative,
            style.tint(NEUTRAL, "Neutral"),
            self.neutral,
        )
        .unwrap();
        let others: Vec<String> = self
            .label_counts
            .iter()
            .filter(|c| ![POSITIVE, NEGATIVE, NEUTRAL].contains(&c.label.as_str()))
            .map(|c| format!("{}: {}", style.tint(&c.label, &c.label), c.count))
            .collect();
        if !others.is_empty() {
            writeln!(out, "Other labels: {}", others.join(", ")).unwrap();
        }

        writeln!(out).unwrap();
        writeln!(out, "{}", style.heading("Recent Articles Preview")).unwrap();
        for card in &self.preview {
            writeln!(
                out,
                "\nArticle {}  {}",
                card.number,
                style.badge(&card.label, card.confidence, 2)
            )
            .unwrap();
            match &card.title {
                Some(title) => {
                    writeln!(out, "  Title: {title}").unwrap();
                }
                None => {
                    writeln!(out, "  Title: Article {}", card.number).unwrap();
                }
            }
            writeln!(out, "  Summary: {}", card.summary.as_deref().unwrap_or("N/A")).unwrap();
            if let Some(link) = &card.link {
                writeln!(out, "  Read Full Article: {link}").unwrap();
            }
        }

        if self.remaining > 0 {
            writeln!(
                out,
                "\nView all {} articles in the article browser.",
                self.total
            )
            .unwrap();
        }
        out
    }
}

/// Render the overview for `session`, or the "analyze first" prompt.
pub fn render(session: &Session, preview_count: usize, style: &Style) -> String {
    match Overview::build(session, preview_count) {
        Some(view) => view.render(style),
        None => format!("{NO_ANALYSIS_MESSAGE}\n"),
    }
}
