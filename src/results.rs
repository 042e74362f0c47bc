//! Result set extraction from raw API payloads.
//!
//! The analysis API answers in one of two shapes:
//!
//! ```text
//! [ {record}, {record}, ... ]            // bare list
//! { "results": [ {record}, ... ], ... }  // wrapped list
//! ```
//!
//! The shape is resolved once into a [`Payload`]; everything downstream works
//! on a plain `Vec<ArticleRecord>`.

use crate::error::AnalysisError;
use crate::models::ArticleRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Key holding the record list in the wrapped payload shape.
pub const RESULTS_KEY: &str = "results";

/// The two accepted top-level payload shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl Payload {
    /// Classify a decoded JSON body.
    pub fn from_value(value: Value) -> Result<Self, AnalysisError> {
        match value {
            Value::Array(items) => Ok(Payload::List(items)),
            Value::Object(map) => Ok(Payload::Object(map)),
            other => Err(AnalysisError::MalformedResponse(format!(
                "expected a list of articles or an object with \"{RESULTS_KEY}\", got {}",
                json_type(&other)
            ))),
        }
    }

    /// The raw record values, in payload order.
    pub fn into_items(self) -> Result<Vec<Value>, AnalysisError> {
        match self {
            Payload::List(items) => Ok(items),
            Payload::Object(mut map) => match map.remove(RESULTS_KEY) {
                None => Ok(Vec::new()),
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(AnalysisError::MalformedResponse(format!(
                    "\"{RESULTS_KEY}\" must be a list, got {}",
                    json_type(&other)
                ))),
            },
        }
    }
}

/// Extract the ordered article records from a raw payload.
///
/// A bare list is returned as-is, a wrapped object yields its `results`
/// (empty when the key is missing). Any other shape, or a record that is not
/// a JSON object, is a [`AnalysisError::MalformedResponse`].
pub fn extract_results(payload: Value) -> Result<Vec<ArticleRecord>, AnalysisError> {
    let items = Payload::from_value(payload)?.into_items()?;
    debug!(count = items.len(), "Extracted result items");

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(AnalysisError::MalformedResponse(format!(
                    "record {i} is a {}, expected an object",
                    json_type(&item)
                )));
            }
            serde_json::from_value::<ArticleRecord>(item).map_err(|e| {
                AnalysisError::MalformedResponse(format!("record {i} could not be read: {e}"))
            })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(records: &[ArticleRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.title()).collect()
    }

    #[test]
    fn test_bare_list_is_returned_in_order() {
        let records = extract_results(json!([{"title": "a"}, {"title": "b"}])).unwrap();
        assert_eq!(titles(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_wrapped_results() {
        let records =
            extract_results(json!({"topic": "AI", "results": [{"title": "a"}]})).unwrap();
        assert_eq!(titles(&records), vec!["a"]);
    }

    #[test]
    fn test_missing_results_key_is_empty() {
        assert!(extract_results(json!({})).unwrap().is_empty());
        assert!(extract_results(json!({"status": "ok"})).unwrap().is_empty());
        assert!(extract_results(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_payload_is_malformed() {
        for payload in [json!("oops"), json!(42), json!(null), json!(true)] {
            let err = extract_results(payload).unwrap_err();
            assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        }
    }

    #[test]
    fn test_non_list_results_is_malformed() {
        let err = extract_results(json!({"results": {"title": "a"}})).unwrap_err();
        assert!(err.to_string().contains("must be a list"));

        let err = extract_results(json!({"results": null})).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        let err = extract_results(json!([{"title": "a"}, "b"])).unwrap_err();
        assert!(err.to_string().contains("record 1 is a string"));
    }

    #[test]
    fn test_payload_classification() {
        assert_eq!(
            Payload::from_value(json!([1])).unwrap(),
            Payload::List(vec![json!(1)])
        );
        assert!(matches!(
            Payload::from_value(json!({"results": []})).unwrap(),
            Payload::Object(_)
        ));
    }

    #[test]
    fn test_raw_sentiment_survives_extraction() {
        let records = extract_results(json!({"results": [
            {"title": "A", "sentiment": {"label": "LABEL_1", "score": 0.9}},
            {"title": "B", "sentiment": "negative"}
        ]}))
        .unwrap();
        assert_eq!(records[0].sentiment, Some(json!({"label": "LABEL_1", "score": 0.9})));
        assert_eq!(records[1].sentiment, Some(json!("negative")));
    }
}
