//! Sentiment breakdown: how labels are distributed across the result set.
//!
//! The view has three parts: the overall distribution (count and share of each
//! label), the label assigned to every article, and one slice per observed
//! label with that label's articles and their mean confidence.

use super::{LabelCount, NO_ANALYSIS_MESSAGE, Style, bar, label_counts, write_title};
use crate::models::ArticleRecord;
use crate::sentiment::color_for;
use crate::session::Session;
use crate::utils::{summary_preview, title_case};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    /// Fraction of all records, in `[0, 1]`.
    pub proportion: f64,
    /// Chart color as a hex code.
    pub color: &'static str,
}

/// One line of the per-article table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRow {
    pub article: String,
    pub label: String,
    pub confidence: f64,
    pub summary_preview: String,
}

/// Articles sharing one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSlice {
    pub label: String,
    pub count: usize,
    pub mean_confidence: f64,
    pub rows: Vec<ArticleRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub topic: String,
    pub total: usize,
    pub distribution: Vec<LabelShare>,
    pub rows: Vec<ArticleRow>,
    pub slices: Vec<LabelSlice>,
}

impl Breakdown {
    pub fn build(session: &Session, summary_chars: usize) -> Option<Self> {
        session.result()?;
        let records = session.results();
        let total = records.len();

        let rows: Vec<ArticleRow> = records
            .iter()
            .enumerate()
            .map(|(i, r)| row(i, r, summary_chars))
            .collect();

        let counts: Vec<LabelCount> = label_counts(records);
        let distribution = counts
            .iter()
            .map(|c| LabelShare {
                label: c.label.clone(),
                count: c.count,
                proportion: c.count as f64 / total as f64,
                color: color_for(&c.label).hex(),
            })
            .collect();

        let slices = counts
            .iter()
            .map(|c| {
                let rows: Vec<ArticleRow> =
                    rows.iter().filter(|r| r.label == c.label).cloned().collect();
                let mean_confidence =
                    rows.iter().map(|r| r.confidence).sum::<f64>() / rows.len() as f64;
                LabelSlice {
                    label: c.label.clone(),
                    count: rows.len(),
                    mean_confidence,
                    rows,
                }
            })
            .collect();

        Some(Self {
            topic: session.topic().to_string(),
            total,
            distribution,
            rows,
            slices,
        })
    }

    pub fn render(&self, style: &Style) -> String {
        let mut out = String::new();
        write_title(&mut out, style, "Sentiment Analysis");

        if self.total == 0 {
            writeln!(out, "No data available for sentiment analysis.").unwrap();
            return out;
        }
        writeln!(out, "Analyzing sentiment for: {}\n", self.topic).unwrap();

        writeln!(out, "{}", style.heading("Overall Sentiment Distribution")).unwrap();
        let width = self
            .distribution
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        for share in &self.distribution {
            writeln!(
                out,
                "  {:<width$}  {}  {:>5.1}% ({})",
                title_case(&share.label),
                style.tint(&share.label, &bar(share.proportion, BAR_WIDTH)),
                share.proportion * 100.0,
                share.count,
            )
            .unwrap();
        }

        writeln!(out, "\n{}", style.heading("Sentiment by Article")).unwrap();
        for row in &self.rows {
            writeln!(
                out,
                "  {:<12} {}",
                row.article,
                style.tint(&row.label, &format!("■ {}", row.label))
            )
            .unwrap();
        }

        writeln!(out, "\n{}", style.heading("Detailed Sentiment Breakdown")).unwrap();
        writeln!(out, "\n[All Articles]").unwrap();
        write_table(&mut out, &self.rows);
        for slice in &self.slices {
            writeln!(out, "\n[{}] {} article(s)", title_case(&slice.label), slice.count).unwrap();
            write_table(&mut out, &slice.rows);
            writeln!(
                out,
                "Average confidence for {} articles: {:.3}",
                slice.label, slice.mean_confidence
            )
            .unwrap();
        }
        out
    }
}

fn row(index: usize, record: &ArticleRecord, summary_chars: usize) -> ArticleRow {
    let sentiment = record.normalized();
    ArticleRow {
        article: format!("Article {}", index + 1),
        label: sentiment.label,
        confidence: sentiment.confidence,
        summary_preview: summary_preview(record.summary.as_deref(), summary_chars),
    }
}

fn write_table(out: &mut String, rows: &[ArticleRow]) {
    writeln!(out, "  {:<12} {:<12} {:>10}  {}", "Article", "Sentiment", "Confidence", "Summary").unwrap();
    for r in rows {
        writeln!(
            out,
            "  {:<12} {:<12} {:>10.3}  {}",
            r.article, r.label, r.confidence, r.summary_preview
        )
        .unwrap();
    }
}

/// Render the breakdown for `session`, or the "analyze first" prompt.
pub fn render(session: &Session, summary_chars: usize, style: &Style) -> String {
    match Breakdown::build(session, summary_chars) {
        Some(view) => view.render(style),
        None => format!("{NO_ANALYSIS_MESSAGE}\n"),
    }
}
