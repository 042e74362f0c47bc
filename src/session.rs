//! Session state shared by the views.
//!
//! A [`Session`] holds the current topic and its analysis result. It is owned
//! by the top-level controller and lent to each view by reference. The only
//! mutation point is [`Session::submit`], which replaces the state wholesale
//! when an analysis succeeds and leaves it untouched when one fails.

use crate::api::Analyze;
use crate::error::AnalysisError;
use crate::models::{AnalysisResult, ArticleRecord};
use tracing::{info, instrument, warn};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Session {
    topic: String,
    result: Option<AnalysisResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an already obtained result (e.g. a saved payload).
    pub fn with_result(result: AnalysisResult) -> Self {
        Self {
            topic: result.topic.clone(),
            result: Some(result),
        }
    }

    /// Topic of the current result, or empty before the first analysis.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Current records; empty when nothing has been analyzed yet.
    pub fn results(&self) -> &[ArticleRecord] {
        self.result
            .as_ref()
            .map(|r| r.articles.as_slice())
            .unwrap_or_default()
    }

    /// Run one analysis and, on success, replace the session contents.
    ///
    /// Returns the number of records found. On failure the previous topic and
    /// result stay in place.
    #[instrument(level = "info", skip(self, analyzer))]
    pub async fn submit<A: Analyze>(
        &mut self,
        analyzer: &A,
        topic: &str,
    ) -> Result<usize, AnalysisError> {
        match analyzer.analyze(topic).await {
            Ok(result) => {
                let count = result.articles.len();
                self.topic = result.topic.clone();
                self.result = Some(result);
                info!(topic = %self.topic, count, "Session updated");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed; keeping previous session state");
                Err(e)
            }
        }
    }

    /// One-line status, shown above every view.
    pub fn status_line(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        Some(format!(
            "Current Topic: {} | Articles Found: {}",
            self.topic,
            result.articles.len()
        ))
    }
}
