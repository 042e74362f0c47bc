//! JSON export of the dashboard views.
//!
//! Writes the overview, breakdown and browser view models of the current
//! session to a single file so the results can be consumed by other tools.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── farming.json
//! └── climate-change.json
//! ```

use crate::config::DashboardConfig;
use crate::session::Session;
use crate::utils::{ensure_writable_dir, slugify_title};
use crate::views::breakdown::Breakdown;
use crate::views::browser::{ArticleFilter, Browser};
use crate::views::overview::Overview;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

#[derive(Debug, Serialize)]
pub struct DashboardExport {
    pub topic: String,
    pub analyzed_at: DateTime<Utc>,
    pub overview: Overview,
    pub breakdown: Breakdown,
    pub browser: Browser,
}

impl DashboardExport {
    /// Assemble the export, or `None` before the first analysis.
    pub fn build(session: &Session, filter: &ArticleFilter, config: &DashboardConfig) -> Option<Self> {
        let result = session.result()?;
        Some(Self {
            topic: session.topic().to_string(),
            analyzed_at: result.analyzed_at,
            overview: Overview::build(session, config.preview_count)?,
            breakdown: Breakdown::build(session, config.summary_preview_chars)?,
            browser: Browser::build(session, filter)?,
        })
    }
}

/// Write the current session's views to `{json_output_dir}/{topic-slug}.json`.
///
/// Returns the written path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_dashboard(
    session: &Session,
    filter: &ArticleFilter,
    config: &DashboardConfig,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let export = DashboardExport::build(session, filter, config)
        .ok_or("nothing to export: analyze a topic first")?;
    let json = serde_json::to_string_pretty(&export)?;

    ensure_writable_dir(json_output_dir).await?;
    let path = PathBuf::from(json_output_dir).join(format!("{}.json", slugify_title(&export.topic)));

    info!(path = %path.display(), "Writing JSON");
    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed to write JSON export");
        return Err(e.into());
    }
    info!(path = %path.display(), articles = export.overview.total, "Wrote JSON export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;
    use crate::session::tests::record;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_write_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let session = Session::with_result(AnalysisResult::new(
            "Climate Change",
            vec![
                record("A", "good news", json!({"label": "LABEL_1", "score": 0.9})),
                record("B", "bad news", json!("negative")),
            ],
        ));
        let filter = ArticleFilter::new(None, Some("negative".into()));

        let path = write_dashboard(&session, &filter, &DashboardConfig::default(), out)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("climate-change.json"));

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["topic"], "Climate Change");
        assert_eq!(written["overview"]["total"], 2);
        assert_eq!(written["overview"]["positive"], 1);
        assert_eq!(written["browser"]["shown"], 1);
        assert_eq!(written["browser"]["cards"][0]["title"], "B");
        assert_eq!(written["browser"]["cards"][0]["color"], "red");
        assert_eq!(written["breakdown"]["distribution"][0]["proportion"], 0.5);
    }

    #[tokio::test]
    async fn test_write_dashboard_without_result_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_dashboard(
            &Session::new(),
            &ArticleFilter::default(),
            &DashboardConfig::default(),
            dir.path().to_str().unwrap(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("analyze a topic first"));
    }
}
