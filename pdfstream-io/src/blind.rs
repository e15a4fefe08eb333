//! Marker scanner: bound a payload by searching for `endstream`

use std::io::Read;

use pdfstream_format::marker::{find_marker_from, rescan_start, trim_trailing_eol};
use pdfstream_format::{ExtractOptions, Result};
use tracing::{debug, trace};

use crate::fill::fill_buffer;

/// Read a payload of unknown length.
///
/// The source is consumed in `opts.increment` steps until `endstream`
/// appears in the accumulated bytes. The result excludes the marker and the
/// run of `\r`/`\n` bytes in front of it. A payload containing `endstream`
/// as data is cut at that point.
///
/// Fails with [`SourceExhausted`](pdfstream_format::StreamError::SourceExhausted)
/// when the source ends before the marker, and with
/// [`LimitExceeded`](pdfstream_format::StreamError::LimitExceeded) when more
/// than `opts.limits.max_stream_len` bytes pass without one.
pub fn read_stream_blindly<R: Read + ?Sized>(
    reader: &mut R,
    opts: &ExtractOptions,
) -> Result<Vec<u8>> {
    opts.validate()?;

    let mut buf = Vec::new();
    grow_by(&mut buf, opts.increment, reader)?;

    let mut searched = 0;
    let end = loop {
        if let Some(i) = find_marker_from(&buf, rescan_start(searched)) {
            break i;
        }
        opts.limits.check_scanned(buf.len())?;
        searched = buf.len();
        grow_by(&mut buf, opts.increment, reader)?;
    };

    buf.truncate(end);
    trim_trailing_eol(&mut buf);

    debug!(len = buf.len(), "located end of stream by marker");
    Ok(buf)
}

/// Append up to `size` bytes from `reader`, keeping only what was read.
fn grow_by<R: Read + ?Sized>(buf: &mut Vec<u8>, size: usize, reader: &mut R) -> Result<usize> {
    let start = buf.len();
    buf.resize(start + size, 0);

    match fill_buffer(reader, &mut buf[start..]) {
        Ok(n) => {
            buf.truncate(start + n);
            trace!(read = n, total = buf.len(), "grew scan buffer");
            Ok(n)
        }
        Err(err) => {
            buf.truncate(start);
            Err(err)
        }
    }
}
