#![forbid(unsafe_code)]

//! Display helpers for status badges and timings.

/// Coarse status classification for row badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx and anything below 200.
    Informational,
    /// 2xx.
    Success,
    /// 3xx.
    Redirect,
    /// 4xx.
    ClientError,
    /// 5xx and above.
    ServerError,
}

impl StatusClass {
    /// Classify a status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            500.. => Self::ServerError,
            400..=499 => Self::ClientError,
            300..=399 => Self::Redirect,
            200..=299 => Self::Success,
            _ => Self::Informational,
        }
    }

    /// Short label for the class.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Informational => "1xx",
            Self::Success => "2xx",
            Self::Redirect => "3xx",
            Self::ClientError => "4xx",
            Self::ServerError => "5xx",
        }
    }
}

/// Whether a status code indicates a failed exchange.
#[must_use]
pub fn is_error_status(status: u16) -> bool {
    status >= 400
}

/// Format an exchange duration for display: `"417ms"` below one second,
/// `"2.35s"` at or above.
#[must_use]
pub fn format_duration(duration_ms: f64) -> String {
    if duration_ms < 1000.0 {
        format!("{}ms", duration_ms.round() as i64)
    } else {
        format!("{:.2}s", duration_ms / 1000.0)
    }
}
