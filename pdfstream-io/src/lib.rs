//! pdfstream I/O - Stream payload extraction over readers
//!
//! This crate reads the raw payload of an embedded stream from a source
//! already positioned at the payload's first byte:
//!
//! - Bounded filling that tolerates short reads
//! - Blind extraction bounded by the `endstream` marker
//! - Length-directed extraction with marker fallback when the length is wrong
//! - Positioning helpers and a seekable [`StreamReader`]
//! - Cancellable sources for liveness

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod blind;
pub mod cancel;
pub mod extract;
pub mod fill;
pub mod position;
pub mod reader;

// Re-export commonly used types
pub use blind::read_stream_blindly;
pub use cancel::{CancelToken, CancellableReader, StopReason};
pub use extract::{extract_stream, read_stream_content, read_stream_content_with};
pub use fill::fill_buffer;
pub use pdfstream_format::{
    Boundary, ExtractOptions, ExtractedStream, Limits, Result, StreamError,
};
pub use position::{position, positioned_reader};
pub use reader::StreamReader;

/// Extract the payload at `offset` of a seekable document in one call.
pub fn extract_at<R>(rs: R, offset: u64, declared_len: usize, opts: &ExtractOptions) -> Result<ExtractedStream>
where
    R: std::io::Read + std::io::Seek,
{
    let mut reader = positioned_reader(rs, offset)?;
    extract_stream(&mut reader, declared_len, opts)
}
