//! Data models for analyzed articles and analysis results.
//!
//! - [`ArticleRecord`]: one article exactly as the analysis API returned it
//! - [`AnalysisResult`]: the ordered records produced for a single topic
//!
//! Records are kept in their received form. Sentiment normalization happens
//! in [`crate::sentiment`] whenever a view needs a label or a confidence, so
//! the raw payload is never lost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single article record as received from the analysis API.
///
/// Every field is optional. Text fields tolerate scalar non-string values
/// (numbers and booleans keep their JSON text); `null` and structured values
/// are treated as absent. `sentiment` is kept as raw JSON because the API
/// sends it either as a plain string or as an object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Value>,
}

impl ArticleRecord {
    /// The article link: `url` when present and non-empty, otherwise `link`.
    pub fn link(&self) -> Option<&str> {
        [self.url.as_deref(), self.link.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }

    /// Title, if the record carries a non-empty one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    /// Summary, if the record carries a non-empty one.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

/// The outcome of one successful topic analysis.
///
/// A new result always replaces the previous one wholesale; nothing is merged
/// and nothing is persisted beyond the running process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// The topic that produced these records.
    pub topic: String,
    /// Records in the order the API returned them.
    pub articles: Vec<ArticleRecord>,
    /// When the analysis completed.
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(topic: impl Into<String>, articles: Vec<ArticleRecord>) -> Self {
        Self {
            topic: topic.into(),
            articles,
            analyzed_at: Utc::now(),
        }
    }
}
