//! Error types for stream extraction

use thiserror::Error;

/// Stream extraction error types
#[derive(Debug, Error)]
pub enum StreamError {
    /// Source reached end of input with no usable payload and no marker.
    #[error("Source exhausted before the stream end could be determined")]
    SourceExhausted,
    /// Underlying read failed for a reason other than end of input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A configured limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// Extraction options are unusable.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// The source was cancelled through its cancel token.
    #[error("Extraction cancelled")]
    Cancelled,
    /// The source deadline passed before extraction finished.
    #[error("Extraction deadline exceeded")]
    DeadlineExceeded,
}

impl StreamError {
    /// True for the end-of-input failure, as opposed to a read error.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StreamError::SourceExhausted)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: StreamError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        match err {
            StreamError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_is_exhausted() {
        assert!(StreamError::SourceExhausted.is_exhausted());
        assert!(!StreamError::Cancelled.is_exhausted());
    }
}
