#![forbid(unsafe_code)]

//! Case-insensitive substring matching over URLs, headers, and bodies.
//!
//! All predicates in this module take the needle already lowercased, so a
//! query engine can lower it once and test thousands of records without
//! re-lowering per record. Haystacks are lowered per call; records are
//! bounded in size by the capture layer.

use memchr::memmem;

use crate::record::{Body, Headers};

/// Whether `haystack` contains `needle_lower`, ignoring case.
///
/// `needle_lower` must already be lowercase. An empty needle matches
/// everything, mirroring substring semantics; callers treat empty filter
/// values as "no constraint" before reaching this point.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    let lowered = haystack.to_lowercase();
    memmem::find(lowered.as_bytes(), needle_lower.as_bytes()).is_some()
}

/// Whether any header key or value contains `needle_lower`, ignoring case.
#[must_use]
pub fn headers_contain(headers: &Headers, needle_lower: &str) -> bool {
    headers.iter().any(|(key, value)| {
        contains_ignore_case(key, needle_lower) || contains_ignore_case(value, needle_lower)
    })
}

/// Whether a body, serialized as text, contains `needle_lower`.
///
/// Structured bodies are serialized to canonical JSON text first; a body
/// that fails to serialize matches nothing. An empty body matches nothing.
#[must_use]
pub fn body_contains(body: &Body, needle_lower: &str) -> bool {
    match body {
        Body::Empty => false,
        Body::Text(text) => contains_ignore_case(text, needle_lower),
        Body::Json(value) => match serde_json::to_string(value) {
            Ok(serialized) => contains_ignore_case(&serialized, needle_lower),
            Err(_) => false,
        },
    }
}
