//! Topic analysis over HTTP.
//!
//! This module talks to the remote analysis API: a single `POST` carrying
//! `{"topic": "..."}` whose JSON answer is a list of analyzed articles
//! (see [`crate::results`] for the accepted shapes).
//!
//! # Architecture
//!
//! - [`Analyze`]: the trait the session controller depends on
//! - [`AnalysisClient`]: the `reqwest`-backed implementation
//!
//! # Failure Handling
//!
//! There is deliberately no retry layer. Each call is one attempt; the caller
//! shows the error and the user decides whether to submit again.

use crate::config::DashboardConfig;
use crate::error::AnalysisError;
use crate::models::AnalysisResult;
use crate::results::extract_results;
use crate::utils::truncate_for_log;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Anything that can turn a topic into an [`AnalysisResult`].
pub trait Analyze {
    /// Analyze news coverage of `topic`.
    ///
    /// Implementations must not touch session state; the caller owns it.
    async fn analyze(&self, topic: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    topic: &'a str,
}

/// HTTP client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AnalysisClient {
    /// Build a client for `endpoint`, optionally bounding each request by `timeout`.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, endpoint })
    }

    /// Build a client from the dashboard configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let endpoint = config.endpoint_url()?;
        let timeout = config.timeout()?;
        Ok(Self::new(endpoint, timeout)?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Analyze for AnalysisClient {
    #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
    async fn analyze(&self, topic: &str) -> Result<AnalysisResult, AnalysisError> {
        let topic = topic.trim();
        if topic.is_empty() {
            warn!("Refusing to analyze an empty topic");
            return Err(AnalysisError::EmptyTopic);
        }

        let t0 = Instant::now();
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { topic })
            .send()
            .await
            .map_err(|e| {
                error!(elapsed_ms = t0.elapsed().as_millis(), error = %e, "Request failed");
                AnalysisError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), elapsed_ms = t0.elapsed().as_millis(), "API returned non-200 status");
            return Err(AnalysisError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&String::from_utf8_lossy(&body), 300),
                "Response body is not valid JSON"
            );
            AnalysisError::transport(format!("invalid JSON body: {e}"))
        })?;
        debug!(bytes = body.len(), "Decoded response body");

        let articles = extract_results(payload)?;
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Analysis complete"
        );
        Ok(AnalysisResult::new(topic, articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::post};
    use serde_json::{Value, json};

    /// Serve `app` on an ephemeral port and return its `/analyze/` URL.
    async fn spawn(app: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/analyze/")).unwrap()
    }

    fn client(endpoint: Url) -> AnalysisClient {
        AnalysisClient::new(endpoint, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_wrapped_payload_success() {
        let app = Router::new().route(
            "/analyze/",
            post(|Json(body): Json<Value>| async move {
                let topic = body["topic"].as_str().unwrap_or_default().to_string();
                Json(json!({"results": [
                    {"title": topic, "summary": "good news", "sentiment": {"label": "LABEL_1", "score": 0.9}},
                    {"title": "B", "summary": "bad news", "sentiment": "negative"}
                ]}))
            }),
        );
        let endpoint = spawn(app).await;

        let result = client(endpoint).analyze("Farming").await.unwrap();
        assert_eq!(result.topic, "Farming");
        assert_eq!(result.articles.len(), 2);
        assert_eq!(result.articles[0].title(), Some("Farming"));
        assert_eq!(result.articles[1].normalized().label, "negative");
    }

    #[tokio::test]
    async fn test_bare_list_payload_success() {
        let app = Router::new().route(
            "/analyze/",
            post(|| async { Json(json!([{"title": "only"}])) }),
        );
        let endpoint = spawn(app).await;

        let result = client(endpoint).analyze("  AI  ").await.unwrap();
        assert_eq!(result.topic, "AI");
        assert_eq!(result.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_non_200_is_http_error() {
        let app = Router::new().route(
            "/analyze/",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "down") }),
        );
        let endpoint = spawn(app).await;

        let err = client(endpoint).analyze("AI").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Http { status: 503 }));
    }

    #[tokio::test]
    async fn test_non_200_success_code_is_http_error() {
        let app = Router::new().route(
            "/analyze/",
            post(|| async { (AxumStatus::CREATED, Json(json!([]))) }),
        );
        let endpoint = spawn(app).await;

        let err = client(endpoint).analyze("AI").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Http { status: 201 }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_transport_error() {
        let app = Router::new().route("/analyze/", post(|| async { "<html>ngrok</html>" }));
        let endpoint = spawn(app).await;

        let err = client(endpoint).analyze("AI").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_malformed() {
        let app = Router::new().route("/analyze/", post(|| async { Json(json!("done")) }));
        let endpoint = spawn(app).await;

        let err = client(endpoint).analyze("AI").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("http://{addr}/analyze/")).unwrap();
        let err = client(endpoint).analyze("AI").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_empty_topic_is_rejected_without_request() {
        let endpoint = Url::parse("http://127.0.0.1:9/analyze/").unwrap();
        let err = client(endpoint).analyze("   ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTopic));
    }

    #[test]
    fn test_from_config_rejects_bad_endpoint() {
        let config = DashboardConfig::default().with_overrides(Some("nope".into()), None);
        assert!(AnalysisClient::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_rejects_zero_timeout() {
        let config = DashboardConfig::default().with_overrides(None, Some(0));
        let err = AnalysisClient::from_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "timeout_secs must be at least 1");
        let config = DashboardConfig::default().with_overrides(None, Some(1));
        assert!(AnalysisClient::from_config(&config).is_ok());
    }
}
