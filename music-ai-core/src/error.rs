//! Error taxonomy for the front end.
//!
//! Only `ValidationError` and `AnalysisError` ever reach the user. Session
//! cleanup failures are logged and dropped; a failed local duration probe is
//! not an error at all (see [`crate::upload::ProbedDuration`]).

use thiserror::Error;

/// A locally chosen file was refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid format \".{extension}\". Allowed: {}", crate::upload::allowed_list())]
    UnsupportedFormat { extension: String },

    #[error("File too large ({size_bytes} bytes). Max {} MB.", .limit_bytes / (1024 * 1024))]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}

impl ValidationError {
    /// Localization key plus placeholder values for this error.
    pub fn message_key(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            Self::UnsupportedFormat { extension } => (
                "error.invalidFormat",
                vec![("ext", extension.clone()), ("allowed", crate::upload::allowed_list())],
            ),
            Self::TooLarge { limit_bytes, .. } => (
                "error.tooLarge",
                vec![("size", (limit_bytes / (1024 * 1024)).to_string())],
            ),
        }
    }
}

/// Submitting a file for analysis failed.
///
/// `Display` prints only the user-facing message: the server's detail text
/// when one was returned, otherwise the transport error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Unexpected response from analysis service: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Releasing a server-side session failed. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Session cleanup failed for {session_id}: {reason}")]
pub struct CleanupFailure {
    pub session_id: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_detail_only() {
        let err = AnalysisError::Server { status: 422, message: "Unsupported codec".into() };
        assert_eq!(err.to_string(), "Unsupported codec");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_transport_error_displays_text() {
        let err = AnalysisError::Transport("Network Error".into());
        assert_eq!(err.to_string(), "Network Error");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_too_large_message_in_megabytes() {
        let err = ValidationError::TooLarge { size_bytes: 200 * 1024 * 1024, limit_bytes: 100 * 1024 * 1024 };
        assert!(err.to_string().contains("Max 100 MB"), "{err}");
        let (key, vars) = err.message_key();
        assert_eq!(key, "error.tooLarge");
        assert_eq!(vars, vec![("size", "100".to_string())]);
    }

    #[test]
    fn test_unsupported_format_lists_allowed_extensions() {
        let err = ValidationError::UnsupportedFormat { extension: "flac".into() };
        assert_eq!(err.to_string(), "Invalid format \".flac\". Allowed: .mp3, .wav, .m4a");
        let (key, vars) = err.message_key();
        assert_eq!(key, "error.invalidFormat");
        assert_eq!(vars[1], ("allowed", crate::upload::allowed_list()));
    }

    #[test]
    fn test_cleanup_failure_message() {
        let err = CleanupFailure { session_id: "S1".into(), reason: "HTTP 500".into() };
        assert_eq!(err.to_string(), "Session cleanup failed for S1: HTTP 500");
    }
}
