//! Domain error types for stampview.
//!
//! These errors represent failures that can occur while classifying,
//! resolving and rendering a timestamp, or while handing a rendered value
//! to the clipboard. Callers pick a fallback display from them instead of
//! receiving an opaque "invalid" string.

use thiserror::Error;

/// Errors raised while turning a timestamp value into rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Unparseable timestamp {value:?}: {reason}")]
    Parse { value: String, reason: String },

    #[error("Timestamp out of representable range: {0}")]
    OutOfRange(String),

    #[error("Invalid display pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid display zone: {0} (expected local, utc or +HH:MM)")]
    InvalidZone(String),
}

impl TimestampError {
    pub(crate) fn parse(value: impl Into<String>, reason: impl Into<String>) -> Self {
        TimestampError::Parse {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Errors related to clipboard writes from the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Any failure of a stampview operation, for callers that handle rendering
/// and clipboard errors on one path.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

impl From<String> for DomainError {
    fn from(message: String) -> Self {
        DomainError::OperationFailed(anyhow::anyhow!(message))
    }
}

impl From<&str> for DomainError {
    fn from(message: &str) -> Self {
        DomainError::OperationFailed(anyhow::anyhow!(message.to_string()))
    }
}
