#![forbid(unsafe_code)]

//! The captured-exchange record and its normalization helpers.
//!
//! An [`EventRecord`] is one completed HTTP request/response exchange as
//! delivered by the capture bridge. Records arrive pre-normalized over a
//! JSON transport, so the serde representation keeps the transport's
//! camelCase field names and deserializes defensively: a partial capture
//! with missing headers or bodies still produces a usable record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header map as captured: keys case-sensitive, deterministic order.
pub type Headers = BTreeMap<String, String>;

/// A request or response body.
///
/// The capture layer delivers bodies as raw text; [`Body::from_raw`] parses
/// JSON payloads into their structured form and keeps everything else as
/// text. Absent bodies are [`Body::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// No body was captured. Serializes as `null`.
    #[default]
    Empty,
    /// A body that is not valid JSON, kept verbatim.
    ///
    /// Listed before `Json` so untagged deserialization maps JSON strings
    /// here rather than wrapping them in a `Value`.
    Text(String),
    /// A parsed JSON body.
    Json(Value),
}

impl Body {
    /// Parse a raw captured body: JSON when possible, text otherwise.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Empty,
            Some(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::String(s)) => Self::Text(s),
                Ok(value) => Self::Json(value),
                Err(_) => Self::Text(text.to_owned()),
            },
        }
    }

    /// Whether no body was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One observed HTTP request/response exchange.
///
/// # Invariants
///
/// 1. `id` is unique within a store at any time; re-submission with an
///    existing id replaces the record wholesale.
/// 2. `id` parses to a monotonically increasing number (the capture start
///    time in milliseconds) and doubles as the insertion-order key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Capture-start timestamp id, unique per exchange.
    pub id: String,
    /// Absolute request URL.
    pub url: String,
    /// HTTP method as captured (`GET`, `POST`, custom verbs included).
    pub method: String,
    /// Response status code.
    #[serde(default)]
    pub status: u16,
    /// Response status text.
    #[serde(default)]
    pub status_text: String,
    /// Total exchange duration in milliseconds.
    #[serde(default)]
    pub duration_ms: f64,
    /// Request headers, keys case-sensitive as captured.
    #[serde(default)]
    pub request_headers: Headers,
    /// Response headers, keys case-sensitive as captured.
    #[serde(default)]
    pub response_headers: Headers,
    /// Request body, if any.
    #[serde(default)]
    pub request_body: Body,
    /// Response body, if any.
    #[serde(default)]
    pub response_body: Body,
    /// Transport-level failure message, when the exchange errored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response content encoding, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl EventRecord {
    /// Numeric interpretation of the id, used as the ordering key.
    ///
    /// Non-numeric ids order as 0. Upstream ids are millisecond timestamps,
    /// so this path is defensive only.
    #[must_use]
    pub fn numeric_id(&self) -> u64 {
        self.id.parse().unwrap_or(0)
    }

    /// Whether the exchange carries a transport error.
    ///
    /// An empty error string counts as no error (upstream emits `""` for
    /// some cancelled exchanges).
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Convert captured `(name, value)` header pairs into a header map.
///
/// Pairs with an empty name are skipped; a repeated name keeps the last
/// value, matching how the capture layer reports merged headers.
#[must_use]
pub fn headers_from_pairs<I, K, V>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut headers = Headers::new();
    for (name, value) in pairs {
        let name = name.into();
        if !name.is_empty() {
            headers.insert(name, value.into());
        }
    }
    headers
}

/// Derive a record id from a capture-start time in milliseconds.
#[must_use]
pub fn timestamp_id(millis: u64) -> String {
    millis.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str) -> EventRecord {
        EventRecord {
            id: id.to_owned(),
            url: "https://api.example.com/v1/items".to_owned(),
            method: "GET".to_owned(),
            status: 200,
            status_text: "OK".to_owned(),
            duration_ms: 42.0,
            ..EventRecord::default()
        }
    }

    #[test]
    fn body_from_raw_parses_json() {
        let body = Body::from_raw(Some(r#"{"ok":true}"#));
        assert_eq!(body, Body::Json(json!({"ok": true})));
    }

    #[test]
    fn body_from_raw_keeps_invalid_json_as_text() {
        let body = Body::from_raw(Some("plain text payload"));
        assert_eq!(body, Body::Text("plain text payload".to_owned()));
    }

    #[test]
    fn body_from_raw_unwraps_json_strings() {
        let body = Body::from_raw(Some(r#""quoted""#));
        assert_eq!(body, Body::Text("quoted".to_owned()));
    }

    #[test]
    fn body_from_raw_absent_is_empty() {
        assert!(Body::from_raw(None).is_empty());
        assert!(Body::from_raw(Some("")).is_empty());
    }

    #[test]
    fn numeric_id_parses_timestamps() {
        assert_eq!(record("1714070000123").numeric_id(), 1_714_070_000_123);
    }

    #[test]
    fn numeric_id_falls_back_to_zero() {
        assert_eq!(record("not-a-number").numeric_id(), 0);
    }

    #[test]
    fn has_error_ignores_empty_strings() {
        let mut rec = record("1");
        assert!(!rec.has_error());
        rec.error = Some(String::new());
        assert!(!rec.has_error());
        rec.error = Some("net::ERR_ABORTED".to_owned());
        assert!(rec.has_error());
    }

    #[test]
    fn headers_from_pairs_skips_empty_names() {
        let headers = headers_from_pairs([("Content-Type", "application/json"), ("", "x")]);
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn headers_from_pairs_last_value_wins() {
        let headers = headers_from_pairs([("X-Trace", "a"), ("X-Trace", "b")]);
        assert_eq!(headers.get("X-Trace").map(String::as_str), Some("b"));
    }

    #[test]
    fn record_round_trips_wire_names() {
        let mut rec = record("1714070000123");
        rec.request_headers = headers_from_pairs([("Accept", "application/json")]);
        rec.response_body = Body::Json(json!({"items": [1, 2, 3]}));
        rec.encoding = Some("gzip".to_owned());

        let wire = serde_json::to_value(&rec).unwrap();
        assert_eq!(wire["statusText"], "OK");
        assert_eq!(wire["durationMs"], 42.0);
        assert_eq!(wire["requestHeaders"]["Accept"], "application/json");
        assert_eq!(wire["requestBody"], Value::Null);

        let back: EventRecord = serde_json::from_value(wire).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn partial_capture_deserializes_with_defaults() {
        let rec: EventRecord = serde_json::from_str(
            r#"{"id":"1714070000123","url":"https://a.example/x","method":"GET"}"#,
        )
        .unwrap();
        assert_eq!(rec.status, 0);
        assert!(rec.request_headers.is_empty());
        assert!(rec.response_body.is_empty());
        assert_eq!(rec.error, None);
    }

    #[test]
    fn timestamp_id_is_decimal_millis() {
        assert_eq!(timestamp_id(1_714_070_000_123), "1714070000123");
    }
}
