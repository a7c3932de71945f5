//! Error types for the Vigil client

use thiserror::Error;

use crate::scan::types::ScanStatus;

/// Result type alias for Vigil operations
pub type VigilResult<T> = Result<T, VigilError>;

/// Main error type for the Vigil client
#[derive(Error, Debug, Clone)]
pub enum VigilError {
    /// Invalid or contradictory configuration, detected before any network
    /// call and never retried
    #[error("Configuration error: {0}")]
    Config(String),

    /// Legitimate "nothing to scan" outcome; short-circuits the pipeline but
    /// is not a failure
    #[error("Scan skipped: {0}")]
    Skipped(String),

    /// A remote call failed; `step` identifies the lifecycle step that issued
    /// the request, `message` carries the underlying cause
    #[error("Remote call failed during {step}: {message}")]
    Remote { step: String, message: String },

    /// The service reported a failure terminal status for the scan
    #[error("Scan ended with remote status {status}")]
    ScanFailed { status: ScanStatus },

    /// Polling exceeded the maximum wait without reaching a terminal status.
    /// Distinct from [`VigilError::ScanFailed`]: the service never reported an
    /// outcome, we gave up waiting.
    #[error("Timed out after {waited_secs} seconds waiting for scan completion")]
    Timeout { waited_secs: u64 },

    /// The caller aborted the run
    #[error("Scan was cancelled")]
    Cancelled,

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),
}

impl VigilError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new skipped outcome
    pub fn skipped(message: impl Into<String>) -> Self {
        Self::Skipped(message.into())
    }

    /// Wrap a remote-call failure with the step that issued it
    pub fn remote(step: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Remote {
            step: step.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new timeout error
    pub const fn timeout(waited_secs: u64) -> Self {
        Self::Timeout { waited_secs }
    }

    /// True when this error is the skipped outcome rather than a real failure
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl From<std::io::Error> for VigilError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for VigilError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for VigilError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

impl From<zip::result::ZipError> for VigilError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Io(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_carries_step_and_cause() {
        let err = VigilError::remote("project resolution", "connection reset");
        assert_eq!(
            err.to_string(),
            "Remote call failed during project resolution: connection reset"
        );
    }

    #[test]
    fn timeout_and_scan_failed_are_distinct() {
        let timeout = VigilError::timeout(900);
        let failed = VigilError::ScanFailed {
            status: ScanStatus::Failed,
        };
        assert!(!matches!(timeout, VigilError::ScanFailed { .. }));
        assert!(!matches!(failed, VigilError::Timeout { .. }));
    }

    #[test]
    fn skipped_is_not_a_failure_classification() {
        assert!(VigilError::skipped("no manifests").is_skipped());
        assert!(!VigilError::config("bad input").is_skipped());
    }
}
