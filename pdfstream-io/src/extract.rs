//! Length-directed extraction with marker fallback

use std::io::Read;

use pdfstream_format::constants::UNKNOWN_LENGTH;
use pdfstream_format::marker::{find_marker, trim_trailing_eol};
use pdfstream_format::{Boundary, ExtractOptions, ExtractedStream, Result, StreamError};
use tracing::{debug, trace};

use crate::blind::read_stream_blindly;
use crate::fill::fill_buffer;

/// Read a stream payload of `declared_len` bytes using default options.
///
/// A `declared_len` of 0 means the length is unknown and the payload is
/// bounded by the `endstream` marker instead.
pub fn read_stream_content<R: Read + ?Sized>(reader: &mut R, declared_len: usize) -> Result<Vec<u8>> {
    read_stream_content_with(reader, declared_len, &ExtractOptions::default())
}

/// Same as [`read_stream_content`] with explicit options.
pub fn read_stream_content_with<R: Read + ?Sized>(
    reader: &mut R,
    declared_len: usize,
    opts: &ExtractOptions,
) -> Result<Vec<u8>> {
    extract_stream(reader, declared_len, opts).map(ExtractedStream::into_data)
}

/// Extract a payload and report how its end was determined.
///
/// With a non-zero `declared_len` the payload is read as exactly that many
/// bytes and returned verbatim. If the source ends first, the bytes read so
/// far are searched for `endstream`; when found the payload ends there
/// ([`Boundary::Fallback`]), otherwise the extraction fails with
/// [`StreamError::SourceExhausted`]. The fallback keeps the EOL run before
/// the marker unless `opts.trim_fallback_eol` is set.
pub fn extract_stream<R: Read + ?Sized>(
    reader: &mut R,
    declared_len: usize,
    opts: &ExtractOptions,
) -> Result<ExtractedStream> {
    extract_stream_sized(reader, declared_len, None, opts)
}

/// [`extract_stream`] for a source known to hold at most `available` bytes.
///
/// The declared-length buffer starts at `min(declared_len, available)` and
/// grows only if the source yields more, so an overlong length does not
/// allocate beyond what the source can supply.
pub(crate) fn extract_stream_sized<R: Read + ?Sized>(
    reader: &mut R,
    declared_len: usize,
    available: Option<u64>,
    opts: &ExtractOptions,
) -> Result<ExtractedStream> {
    opts.validate()?;
    debug!(declared_len, "reading stream content");

    if declared_len == UNKNOWN_LENGTH {
        let data = read_stream_blindly(reader, opts)?;
        return Ok(ExtractedStream {
            data,
            boundary: Boundary::Marker,
            declared_len,
        });
    }

    opts.limits.check_declared(declared_len)?;
    let initial = available.map_or(declared_len, |avail| {
        declared_len.min(usize::try_from(avail).unwrap_or(usize::MAX))
    });
    let mut buf = vec![0u8; initial];
    let mut total = 0;

    while total < declared_len {
        if total == buf.len() {
            let grown = declared_len.min(total.saturating_mul(2).max(total + opts.increment));
            buf.resize(grown, 0);
        }
        match fill_buffer(reader, &mut buf[total..]) {
            Ok(count) => {
                trace!(count, total, declared_len, "filled stream buffer");
                total += count;
            }
            Err(StreamError::SourceExhausted) => {
                return recover_at_marker(buf, total, declared_len, opts);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(declared_len, "stream content complete");
    Ok(ExtractedStream {
        data: buf,
        boundary: Boundary::Declared,
        declared_len,
    })
}

fn recover_at_marker(
    mut buf: Vec<u8>,
    filled: usize,
    declared_len: usize,
    opts: &ExtractOptions,
) -> Result<ExtractedStream> {
    // Only the filled prefix holds source bytes.
    let Some(end) = find_marker(&buf[..filled]) else {
        debug!(filled, declared_len, "source ended short of declared length, no marker");
        return Err(StreamError::SourceExhausted);
    };

    buf.truncate(end);
    if opts.trim_fallback_eol {
        trim_trailing_eol(&mut buf);
    }

    debug!(
        declared_len,
        actual = buf.len(),
        "declared length overran source, recovered at marker"
    );
    Ok(ExtractedStream {
        data: buf,
        boundary: Boundary::Fallback,
        declared_len,
    })
}
