//! Transport-independent pieces of the analysis service protocol:
//! progress arithmetic, the progress observer seam, and response decoding.

use crate::error::AnalysisError;
use crate::types::{AnalysisResult, ErrorBody, HealthStatus};

/// Receives upload progress for one submission.
///
/// Once `is_cancelled` reports true the transport stops delivering updates;
/// the request itself keeps running.
pub trait ProgressObserver {
    fn on_progress(&self, percent: u8);

    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F: Fn(u8)> ProgressObserver for F {
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

/// Rounded percentage of bytes sent. `None` while the total is unknown.
pub fn progress_percent(loaded: f64, total: f64) -> Option<u8> {
    if !(total > 0.0) || !loaded.is_finite() {
        return None;
    }
    let pct = (loaded * 100.0 / total).round().clamp(0.0, 100.0);
    Some(pct as u8)
}

/// Decode a 2xx body into an [`AnalysisResult`].
pub fn parse_analysis(body: &str) -> Result<AnalysisResult, AnalysisError> {
    serde_json::from_str(body).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
}

pub fn parse_health(body: &str) -> Result<HealthStatus, AnalysisError> {
    serde_json::from_str(body).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
}

/// Build the error for a non-2xx response: the server's `detail` text wins,
/// then its `error` field, then a generic status line.
pub fn error_from_response(status: u16, body: &str) -> AnalysisError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed.detail.and_then(|d| match d {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    });
    let message = detail
        .or(parsed.error.filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| format!("Request failed with status code {status}"));
    AnalysisError::Server { status, message }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_progress_rounding() {
        assert_eq!(progress_percent(0.0, 1000.0), Some(0));
        assert_eq!(progress_percent(333.0, 1000.0), Some(33));
        assert_eq!(progress_percent(335.0, 1000.0), Some(34));
        assert_eq!(progress_percent(1000.0, 1000.0), Some(100));
    }

    #[test]
    fn test_progress_unknown_total() {
        assert_eq!(progress_percent(10.0, 0.0), None);
        assert_eq!(progress_percent(10.0, f64::NAN), None);
    }

    #[test]
    fn test_progress_never_exceeds_hundred() {
        assert_eq!(progress_percent(1200.0, 1000.0), Some(100));
    }

    #[test]
    fn test_closure_observer() {
        let seen = RefCell::new(Vec::new());
        let observer = |p: u8| seen.borrow_mut().push(p);
        observer.on_progress(10);
        observer.on_progress(55);
        assert!(!observer.is_cancelled());
        assert_eq!(*seen.borrow(), vec![10, 55]);
    }

    #[test]
    fn test_error_prefers_detail() {
        let err = error_from_response(400, r#"{"error": "bad_request", "detail": "Unsupported file type"}"#);
        assert_eq!(err, AnalysisError::Server { status: 400, message: "Unsupported file type".into() });
    }

    #[test]
    fn test_error_falls_back_to_error_field() {
        let err = error_from_response(500, r#"{"error": "internal"}"#);
        assert_eq!(err.to_string(), "internal");
    }

    #[test]
    fn test_error_structured_detail_is_stringified() {
        let err = error_from_response(422, r#"{"detail": [{"msg": "field required"}]}"#);
        assert!(err.to_string().contains("field required"), "{err}");
    }

    #[test]
    fn test_error_without_body() {
        let err = error_from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }

    #[test]
    fn test_parse_analysis_rejects_garbage() {
        let err = parse_analysis("{}").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_health() {
        assert_eq!(parse_health(r#"{"status": "ok"}"#).unwrap().status, "ok");
    }

    #[test]
    fn test_success_range() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(301));
        assert!(!is_success(404));
    }
}
