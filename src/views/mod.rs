//! Presentation views over the current session.
//!
//! Each view is split in two steps:
//!
//! 1. `build(&Session, ..)` computes a serializable view model. This is a pure
//!    function of the session; views never fetch or mutate data.
//! 2. `render(&Style)` turns the model into terminal text.
//!
//! # Submodules
//!
//! - [`overview`]: totals, label counts and a short preview of the records
//! - [`breakdown`]: label distribution, per-article labels, per-label slices
//! - [`browser`]: searchable, label-filterable article cards

pub mod breakdown;
pub mod browser;
pub mod overview;

use crate::models::ArticleRecord;
use crate::sentiment::{SentimentColor, color_for};
use crate::utils::title_case;
use clap::ValueEnum;
use crossterm::style::{Color, Stylize};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Write;

/// Shown by every view before the first successful analysis.
pub const NO_ANALYSIS_MESSAGE: &str =
    "Please analyze a topic first to view results (try: analyze <topic>).";

/// Which view(s) to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    Overview,
    Breakdown,
    Browser,
    All,
}

/// Terminal styling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub const PLAIN: Style = Style { color: false };
    pub const COLOR: Style = Style { color: true };

    /// Render a label badge, e.g. ` Positive · 0.90 `.
    pub fn badge(&self, label: &str, confidence: f64, decimals: usize) -> String {
        let text = format!("{} · {:.*}", title_case(label), decimals, confidence);
        if self.color {
            format!(" {text} ")
                .with(Color::White)
                .on(color_for(label).terminal_color())
                .bold()
                .to_string()
        } else {
            format!("[{text}]")
        }
    }

    /// Color `text` with the label's color, if colors are enabled.
    pub fn tint(&self, label: &str, text: &str) -> String {
        if self.color {
            text.with(color_for(label).terminal_color()).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// A single article as the views present it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    /// 1-based position within the list being shown.
    pub number: usize,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub label: String,
    pub confidence: f64,
    pub color: SentimentColor,
}

impl ArticleCard {
    pub fn from_record(number: usize, record: &ArticleRecord) -> Self {
        let sentiment = record.normalized();
        Self {
            number,
            title: record.title().map(str::to_string),
            summary: record.summary().map(str::to_string),
            link: record.link().map(str::to_string),
            color: color_for(&sentiment.label),
            label: sentiment.label,
            confidence: sentiment.confidence,
        }
    }
}

/// Number of records per normalized label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Distinct normalized labels, in order of first appearance.
pub fn distinct_labels(records: &[ArticleRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.normalized().label)
        .unique()
        .collect()
}

/// Count records per label, most frequent first; ties keep first-appearance order.
pub fn label_counts(records: &[ArticleRecord]) -> Vec<LabelCount> {
    let labels: Vec<String> = records.iter().map(|r| r.normalized().label).collect();
    let counts = labels.iter().counts();
    let mut out: Vec<LabelCount> = labels
        .iter()
        .unique()
        .map(|label| LabelCount {
            label: label.clone(),
            count: counts[label],
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Horizontal text bar of `width` cells filled to `fraction`.
pub(crate) fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut s = String::with_capacity(width * 3);
    for i in 0..width {
        s.push(if i < filled { '█' } else { '░' });
    }
    s
}

/// Header line shared by all views.
pub(crate) fn write_title(out: &mut String, style: &Style, title: &str) {
    writeln!(out, "{}", style.heading(title)).unwrap();
    writeln!(out, "{}", "─".repeat(title.chars().count().max(40))).unwrap();
}
