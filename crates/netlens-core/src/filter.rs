#![forbid(unsafe_code)]

//! The filter predicate set applied to the live capture window.
//!
//! [`FilterCriteria`] is the value the filter-input widgets produce: one
//! optional constraint per key, combined with logical AND. Unset values
//! (`None`, empty strings, `Some(false)` for the error toggle) mean "no
//! constraint" and are ignored, so noisy or partially-populated filter
//! widgets never raise errors.
//!
//! Structural equality on `FilterCriteria` is the result-cache key: two
//! criteria with the same keys and values hit the same cached result list.

use serde::{Deserialize, Deserializer, Serialize};

use crate::record::EventRecord;
use crate::search::{body_contains, contains_ignore_case, headers_contain};

/// The active set of filter constraints for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// URL substring, case-insensitive.
    pub search_text: Option<String>,
    /// Inclusive lower bound on the numeric record id.
    pub time_start: Option<u64>,
    /// Inclusive upper bound on the numeric record id.
    pub time_end: Option<u64>,
    /// Exact status match (`"404"`), or class match when the value ends in
    /// `xx` (`"4xx"` matches by leading digit of the stringified status).
    /// Filter widgets send either a string or a bare number; both
    /// deserialize here.
    #[serde(deserialize_with = "status_code_value")]
    pub status_code: Option<String>,
    /// Exact method match.
    pub method: Option<String>,
    /// When true: only records with a transport error or status >= 400.
    pub only_errors: Option<bool>,
    /// Substring across request header keys and values, case-insensitive.
    pub request_header_search: Option<String>,
    /// Substring against the request body serialized as text.
    pub request_body_search: Option<String>,
    /// Substring across response header keys and values, case-insensitive.
    pub response_header_search: Option<String>,
    /// Substring against the response body serialized as text.
    pub response_body_search: Option<String>,
}

fn unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn status_code_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

impl FilterCriteria {
    /// Whether every key is unset, meaning a query needs no filtering pass.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        unset(&self.search_text)
            && self.time_start.is_none()
            && self.time_end.is_none()
            && unset(&self.status_code)
            && unset(&self.method)
            && !self.only_errors.unwrap_or(false)
            && unset(&self.request_header_search)
            && unset(&self.request_body_search)
            && unset(&self.response_header_search)
            && unset(&self.response_body_search)
    }

    /// Pre-lower the search needles for evaluation against many records.
    #[must_use]
    pub fn compile(&self) -> CompiledCriteria {
        let lowered = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
        };
        CompiledCriteria {
            url_needle: lowered(&self.search_text),
            time_start: self.time_start,
            time_end: self.time_end,
            status: self
                .status_code
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(StatusPattern::parse),
            method: self.method.clone().filter(|m| !m.is_empty()),
            only_errors: self.only_errors.unwrap_or(false),
            request_header_needle: lowered(&self.request_header_search),
            request_body_needle: lowered(&self.request_body_search),
            response_header_needle: lowered(&self.response_header_search),
            response_body_needle: lowered(&self.response_body_search),
        }
    }

    /// Evaluate this criteria set against one record.
    ///
    /// Convenience for single-record checks; query engines should
    /// [`compile`](Self::compile) once and reuse the result.
    #[must_use]
    pub fn matches(&self, record: &EventRecord) -> bool {
        self.compile().matches(record)
    }
}

/// A status-code constraint, parsed from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StatusPattern {
    /// Full stringified-status equality.
    Exact(String),
    /// Class match: compare the leading character of the stringified
    /// status. Intentionally lenient for statuses outside 100..=599.
    Class(char),
}

impl StatusPattern {
    fn parse(value: &str) -> Self {
        if value.ends_with("xx")
            && let Some(leading) = value.chars().next()
        {
            return Self::Class(leading);
        }
        Self::Exact(value.to_owned())
    }

    fn matches(&self, status: u16) -> bool {
        let status = status.to_string();
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Class(leading) => status.starts_with(*leading),
        }
    }
}

/// A [`FilterCriteria`] with search needles lowered once up front.
#[derive(Debug, Clone)]
pub struct CompiledCriteria {
    url_needle: Option<String>,
    time_start: Option<u64>,
    time_end: Option<u64>,
    status: Option<StatusPattern>,
    method: Option<String>,
    only_errors: bool,
    request_header_needle: Option<String>,
    request_body_needle: Option<String>,
    response_header_needle: Option<String>,
    response_body_needle: Option<String>,
}

impl CompiledCriteria {
    /// Whether `record` satisfies every present constraint.
    #[must_use]
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(needle) = &self.url_needle
            && !contains_ignore_case(&record.url, needle)
        {
            return false;
        }
        if let Some(start) = self.time_start
            && record.numeric_id() < start
        {
            return false;
        }
        if let Some(end) = self.time_end
            && record.numeric_id() > end
        {
            return false;
        }
        if let Some(status) = &self.status
            && !status.matches(record.status)
        {
            return false;
        }
        if let Some(method) = &self.method
            && record.method != *method
        {
            return false;
        }
        if self.only_errors && !record.has_error() && record.status < 400 {
            return false;
        }
        if let Some(needle) = &self.request_header_needle
            && !headers_contain(&record.request_headers, needle)
        {
            return false;
        }
        if let Some(needle) = &self.request_body_needle
            && !body_contains(&record.request_body, needle)
        {
            return false;
        }
        if let Some(needle) = &self.response_header_needle
            && !headers_contain(&record.response_headers, needle)
        {
            return false;
        }
        if let Some(needle) = &self.response_body_needle
            && !body_contains(&record.response_body, needle)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Body, headers_from_pairs};
    use serde_json::json;

    fn record() -> EventRecord {
        EventRecord {
            id: "1714070000200".to_owned(),
            url: "https://api.example.com/v1/users?page=2".to_owned(),
            method: "POST".to_owned(),
            status: 201,
            status_text: "Created".to_owned(),
            duration_ms: 88.5,
            request_headers: headers_from_pairs([("Content-Type", "application/json")]),
            response_headers: headers_from_pairs([("X-Request-Id", "abc-123")]),
            request_body: Body::Json(json!({"name": "Ada"})),
            response_body: Body::Json(json!({"id": 7, "name": "Ada"})),
            error: None,
            encoding: None,
        }
    }

    #[test]
    fn empty_criteria_is_empty() {
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let criteria = FilterCriteria {
            search_text: Some(String::new()),
            status_code: Some(String::new()),
            only_errors: Some(false),
            ..FilterCriteria::default()
        };
        assert!(criteria.is_empty());
        assert!(criteria.matches(&record()));
    }

    #[test]
    fn url_search_is_case_insensitive() {
        let criteria = FilterCriteria {
            search_text: Some("V1/USERS".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record()));

        let criteria = FilterCriteria {
            search_text: Some("v2/users".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&record()));
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let rec = record();
        let id = rec.numeric_id();

        let at_bounds = FilterCriteria {
            time_start: Some(id),
            time_end: Some(id),
            ..FilterCriteria::default()
        };
        assert!(at_bounds.matches(&rec));

        let before = FilterCriteria {
            time_end: Some(id - 1),
            ..FilterCriteria::default()
        };
        assert!(!before.matches(&rec));

        let after = FilterCriteria {
            time_start: Some(id + 1),
            ..FilterCriteria::default()
        };
        assert!(!after.matches(&rec));
    }

    #[test]
    fn status_exact_match() {
        let criteria = FilterCriteria {
            status_code: Some("201".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record()));

        let criteria = FilterCriteria {
            status_code: Some("200".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&record()));
    }

    #[test]
    fn status_class_match() {
        let two_xx = FilterCriteria {
            status_code: Some("2xx".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(two_xx.matches(&record()));

        let four_xx = FilterCriteria {
            status_code: Some("4xx".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(!four_xx.matches(&record()));
    }

    #[test]
    fn status_class_checks_leading_digit_only() {
        // Lenient on purpose: a 99 would match nothing, a 999 would match
        // "9xx". See the status-pattern docs.
        let mut rec = record();
        rec.status = 999;
        let nine_xx = FilterCriteria {
            status_code: Some("9xx".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(nine_xx.matches(&rec));
    }

    #[test]
    fn method_is_exact_and_case_sensitive() {
        let criteria = FilterCriteria {
            method: Some("POST".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record()));

        let criteria = FilterCriteria {
            method: Some("post".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&record()));
    }

    #[test]
    fn only_errors_matches_error_or_4xx_plus() {
        let criteria = FilterCriteria {
            only_errors: Some(true),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&record()));

        let mut failed = record();
        failed.status = 503;
        assert!(criteria.matches(&failed));

        let mut errored = record();
        errored.error = Some("net::ERR_CONNECTION_RESET".to_owned());
        assert!(criteria.matches(&errored));
    }

    #[test]
    fn header_search_covers_keys_and_values() {
        let by_key = FilterCriteria {
            request_header_search: Some("content-type".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(by_key.matches(&record()));

        let by_value = FilterCriteria {
            response_header_search: Some("ABC-123".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(by_value.matches(&record()));

        let absent = FilterCriteria {
            response_header_search: Some("set-cookie".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(!absent.matches(&record()));
    }

    #[test]
    fn body_search_uses_serialized_form() {
        let criteria = FilterCriteria {
            response_body_search: Some(r#""name":"Ada""#.to_owned()),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record()));
    }

    #[test]
    fn criteria_combine_with_and() {
        let criteria = FilterCriteria {
            search_text: Some("users".to_owned()),
            method: Some("POST".to_owned()),
            status_code: Some("2xx".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record()));

        let conflicting = FilterCriteria {
            method: Some("GET".to_owned()),
            ..criteria
        };
        assert!(!conflicting.matches(&record()));
    }

    #[test]
    fn criteria_equality_is_structural() {
        let a = FilterCriteria {
            method: Some("GET".to_owned()),
            only_errors: Some(true),
            ..FilterCriteria::default()
        };
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, FilterCriteria::default());
    }

    #[test]
    fn criteria_round_trips_wire_names() {
        let criteria = FilterCriteria {
            search_text: Some("api".to_owned()),
            time_start: Some(100),
            only_errors: Some(true),
            ..FilterCriteria::default()
        };
        let wire = serde_json::to_value(&criteria).unwrap();
        assert_eq!(wire["searchText"], "api");
        assert_eq!(wire["timeStart"], 100);
        assert_eq!(wire["onlyErrors"], true);

        let back: FilterCriteria = serde_json::from_value(wire).unwrap();
        assert_eq!(back, criteria);
    }

    #[test]
    fn status_code_accepts_string_or_number() {
        let from_string: FilterCriteria =
            serde_json::from_str(r#"{"statusCode":"4xx"}"#).unwrap();
        assert_eq!(from_string.status_code.as_deref(), Some("4xx"));

        let from_number: FilterCriteria = serde_json::from_str(r#"{"statusCode":404}"#).unwrap();
        assert_eq!(from_number.status_code.as_deref(), Some("404"));
        assert!(from_number.matches(&EventRecord {
            status: 404,
            ..record()
        }));
    }
}
