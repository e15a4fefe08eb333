//! pdfstream Format - Core primitives for stream payload extraction
//!
//! This crate provides the I/O-free building blocks used to bound an embedded
//! stream payload inside a PDF-like document. It includes:
//!
//! - Framing constants (the `endstream` marker, EOL bytes, growth increment)
//! - Marker search and trailing EOL trimming
//! - Error types
//! - Limits and extraction options

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod limits;
pub mod marker;

// Re-export commonly used types
pub use error::{Result, StreamError};
pub use limits::{ExtractOptions, Limits};

/// How the end of an extracted payload was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The declared length was satisfied exactly
    Declared,
    /// No length was trusted; the marker ended the payload
    Marker,
    /// The declared length overran the source; the marker recovered the end
    Fallback,
}

impl Boundary {
    /// Short lowercase name, as printed by the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Declared => "declared",
            Boundary::Marker => "marker",
            Boundary::Fallback => "fallback",
        }
    }

    /// Whether the declared length should be rewritten by the caller
    pub fn needs_length_fix(&self) -> bool {
        !matches!(self, Boundary::Declared)
    }
}

/// A payload together with how it was bounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStream {
    /// Payload bytes, never including the marker
    pub data: Vec<u8>,
    /// How the end of `data` was found
    pub boundary: Boundary,
    /// Length hint the caller supplied (0 when unknown)
    pub declared_len: usize,
}

impl ExtractedStream {
    /// The length to record in place of the declared one, if it was wrong or absent
    pub fn corrected_length(&self) -> Option<usize> {
        if self.boundary.needs_length_fix() {
            Some(self.data.len())
        } else {
            None
        }
    }

    /// Consume and return the payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
