//! Stream reader over a seekable document

use std::io::{BufReader, Read, Seek, SeekFrom};
use std::time::Duration;

use pdfstream_format::{ExtractOptions, ExtractedStream, Result};
use tracing::debug;

use crate::cancel::{CancelToken, CancellableReader};
use crate::extract::extract_stream_sized;
use crate::position::position;

/// Extracts stream payloads at known offsets of a seekable document
pub struct StreamReader<R: Read + Seek> {
    reader: R,
    opts: ExtractOptions,
    token: CancelToken,
    timeout: Option<Duration>,
    file_size: u64,
}

impl<R: Read + Seek> StreamReader<R> {
    /// Create a new reader, validating `opts` up front
    pub fn new(mut reader: R, opts: ExtractOptions) -> Result<Self> {
        opts.validate()?;
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        Ok(Self {
            reader,
            opts,
            token: CancelToken::new(),
            timeout: None,
            file_size,
        })
    }

    /// Create a reader with default options
    pub fn with_defaults(reader: R) -> Result<Self> {
        Self::new(reader, ExtractOptions::default())
    }

    /// Stop extractions once `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    /// Bound each extraction to `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Options used for every extraction
    pub fn options(&self) -> &ExtractOptions {
        &self.opts
    }

    /// Size of the document in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Extract the payload starting at `offset`.
    ///
    /// `declared_len` is the document's length hint, 0 when absent. The
    /// payload buffer is sized to the bytes left in the document, not to an
    /// overlong `declared_len`.
    pub fn extract_at(&mut self, offset: u64, declared_len: usize) -> Result<ExtractedStream> {
        debug!(offset, declared_len, file_size = self.file_size, "extracting stream");
        position(&mut self.reader, offset)?;

        let buffered = BufReader::new(&mut self.reader);
        let mut source = match self.timeout {
            Some(timeout) => CancellableReader::with_timeout(buffered, self.token.clone(), timeout),
            None => CancellableReader::new(buffered, self.token.clone()),
        };

        let available = self.file_size.saturating_sub(offset);
        extract_stream_sized(&mut source, declared_len, Some(available), &self.opts)
    }

    /// Consume the reader and return the underlying document.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
