//! Extraction limits and options

use serde::Deserialize;

use crate::constants::DEFAULT_INCREMENT;
use crate::error::{Result, StreamError};

/// Limits guarding against hostile or corrupt length information
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum payload size, declared or scanned (default: 256 MiB)
    pub max_stream_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_stream_len: 256 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Reject a declared length above `max_stream_len`.
    pub fn check_declared(&self, declared_len: usize) -> Result<()> {
        if declared_len > self.max_stream_len {
            return Err(StreamError::LimitExceeded(format!(
                "declared length {} exceeds maximum {}",
                declared_len, self.max_stream_len
            )));
        }
        Ok(())
    }

    /// Reject a blind accumulation that grew past `max_stream_len`.
    pub fn check_scanned(&self, scanned_len: usize) -> Result<()> {
        if scanned_len > self.max_stream_len {
            return Err(StreamError::LimitExceeded(format!(
                "no end marker within {} bytes (maximum {})",
                scanned_len, self.max_stream_len
            )));
        }
        Ok(())
    }
}

/// Options controlling a single extraction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Bytes read per growth step while scanning for the marker
    pub increment: usize,
    /// Strip the EOL run before the marker when a wrong declared length
    /// is recovered through the marker
    pub trim_fallback_eol: bool,
    /// Size limits
    pub limits: Limits,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            increment: DEFAULT_INCREMENT,
            trim_fallback_eol: false,
            limits: Limits::default(),
        }
    }
}

impl ExtractOptions {
    /// Check the options are usable before touching the source.
    pub fn validate(&self) -> Result<()> {
        if self.increment == 0 {
            return Err(StreamError::InvalidOptions(
                "increment must be non-zero".to_string(),
            ));
        }
        if self.limits.max_stream_len == 0 {
            return Err(StreamError::InvalidOptions(
                "max_stream_len must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
