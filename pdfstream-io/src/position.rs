//! Positioning a seekable document at a payload offset

use std::io::{BufReader, Read, Seek, SeekFrom};

use pdfstream_format::Result;
use tracing::debug;

/// Seek `rs` to `offset` from the start.
pub fn position<R: Seek + ?Sized>(rs: &mut R, offset: u64) -> Result<()> {
    rs.seek(SeekFrom::Start(offset))?;
    debug!(offset, "positioned reader");
    Ok(())
}

/// Seek `rs` to `offset` and wrap it in a [`BufReader`] ready for extraction.
pub fn positioned_reader<R: Read + Seek>(mut rs: R, offset: u64) -> Result<BufReader<R>> {
    position(&mut rs, offset)?;
    Ok(BufReader::new(rs))
}
