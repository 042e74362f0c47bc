//! Sentiment normalization.
//!
//! The analysis API is not consistent about how it reports sentiment. A record
//! may carry a bare string (`"negative"`), a classifier object
//! (`{"label": "LABEL_1", "score": 0.98}`), an object keyed by `sentiment` or
//! `prediction`, something else entirely, or nothing at all. This module turns
//! every one of those shapes into a [`NormalizedSentiment`].
//!
//! Normalization is total: every input yields a non-empty lower-case label and
//! a finite confidence. Nothing here returns an error.
//!
//! # Label resolution order
//!
//! | Input | Label |
//! |-------|-------|
//! | string | lower-cased verbatim |
//! | object with `label` | lower-cased, `label_1` → `positive`, `label_0` → `negative` |
//! | object with `sentiment` | lower-cased |
//! | object with `prediction` | lower-cased |
//! | other non-empty object | first value (payload order), lower-cased |
//! | empty object, `null`, missing | `unknown` |
//! | any other value | lower-cased text, or `unknown` when falsy |

use crate::models::ArticleRecord;
use crossterm::style::Color;
use serde::Serialize;
use serde_json::Value;

pub const POSITIVE: &str = "positive";
pub const NEGATIVE: &str = "negative";
pub const NEUTRAL: &str = "neutral";
pub const MIXED: &str = "mixed";
pub const UNKNOWN: &str = "unknown";

/// Canonical `(label, confidence)` pair for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSentiment {
    pub label: String,
    pub confidence: f64,
}

/// Normalize both halves of a raw sentiment value.
pub fn normalize(input: Option<&Value>) -> NormalizedSentiment {
    NormalizedSentiment {
        label: normalize_label(input),
        confidence: normalize_confidence(input),
    }
}

impl ArticleRecord {
    /// The record's sentiment, normalized.
    pub fn normalized(&self) -> NormalizedSentiment {
        normalize(self.sentiment.as_ref())
    }
}

/// Resolve a raw sentiment value to a lower-case label.
///
/// Classifier labels outside the `LABEL_0` / `LABEL_1` pair pass through
/// unmapped, so the label set is open-ended.
pub fn normalize_label(input: Option<&Value>) -> String {
    let label = match input {
        None | Some(Value::Null) => return UNKNOWN.to_string(),
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Object(map)) => {
            if let Some(label) = map.get("label") {
                map_classifier_label(text_form(label).to_lowercase())
            } else if let Some(sentiment) = map.get("sentiment") {
                text_form(sentiment).to_lowercase()
            } else if let Some(prediction) = map.get("prediction") {
                text_form(prediction).to_lowercase()
            } else if let Some((_, first)) = map.iter().next() {
                text_form(first).to_lowercase()
            } else {
                return UNKNOWN.to_string();
            }
        }
        Some(other) if is_falsy(other) => return UNKNOWN.to_string(),
        Some(other) => text_form(other).to_lowercase(),
    };

    if label.is_empty() {
        UNKNOWN.to_string()
    } else {
        label
    }
}

fn map_classifier_label(label: String) -> String {
    match label.as_str() {
        "label_1" => POSITIVE.to_string(),
        "label_0" => NEGATIVE.to_string(),
        _ => label,
    }
}

/// Extract the confidence score from a raw sentiment value.
///
/// Only objects carrying a `score` key have a confidence. Numbers, numeric
/// strings and booleans convert; anything else, including non-finite values,
/// yields `0.0`.
pub fn normalize_confidence(input: Option<&Value>) -> f64 {
    let Some(Value::Object(map)) = input else {
        return 0.0;
    };
    let score = match map.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    score.filter(|s| s.is_finite()).unwrap_or(0.0)
}

/// Display text of a JSON value, as used when lower-casing labels.
fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Badge color assigned to a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentColor {
    Green,
    Red,
    Gray,
    Orange,
}

impl SentimentColor {
    pub fn hex(self) -> &'static str {
        match self {
            SentimentColor::Green => "#28a745",
            SentimentColor::Red => "#dc3545",
            SentimentColor::Gray => "#6c757d",
            SentimentColor::Orange => "#fd7e14",
        }
    }

    pub fn terminal_color(self) -> Color {
        match self {
            SentimentColor::Green => Color::Rgb { r: 0x28, g: 0xa7, b: 0x45 },
            SentimentColor::Red => Color::Rgb { r: 0xdc, g: 0x35, b: 0x45 },
            SentimentColor::Gray => Color::Rgb { r: 0x6c, g: 0x75, b: 0x7d },
            SentimentColor::Orange => Color::Rgb { r: 0xfd, g: 0x7e, b: 0x14 },
        }
    }
}

/// Fixed label → color table; unrecognized labels fall back to gray.
pub fn color_for(label: &str) -> SentimentColor {
    match label.to_lowercase().as_str() {
        POSITIVE => SentimentColor::Green,
        NEGATIVE => SentimentColor::Red,
        MIXED => SentimentColor::Orange,
        _ => SentimentColor::Gray,
    }
}
