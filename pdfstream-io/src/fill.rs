//! Bounded filler: read until a slice is full or the source ends

use std::io::{ErrorKind, Read};

use pdfstream_format::{Result, StreamError};

use crate::cancel::classify_io;

/// Read into `buf` until it is full or the source reports end of input.
///
/// Returns the number of bytes placed. A short count means the source ended
/// after at least one byte; whether that is a problem is up to the caller.
/// End of input before any byte is [`StreamError::SourceExhausted`].
/// Interrupted reads are retried; any other read error is returned.
pub fn fill_buffer<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(classify_io(err)),
        }
    }

    if filled == 0 && !buf.is_empty() {
        return Err(StreamError::SourceExhausted);
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfstream_test_utils::sources::{ChunkedReader, FailingReader, InterruptingReader};
    use std::io::{self, Cursor};

    #[test]
    fn test_fills_exactly() {
        let mut src = Cursor::new(b"abcdef".to_vec());
        let mut buf = [0u8; 4];
        assert_eq!(fill_buffer(&mut src, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(src.position(), 4);
    }

    #[test]
    fn test_short_fill_is_not_an_error() {
        let mut src = Cursor::new(b"ab".to_vec());
        let mut buf = [0u8; 8];
        assert_eq!(fill_buffer(&mut src, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
        assert_eq!(&buf[2..], &[0u8; 6]);
    }

    #[test]
    fn test_empty_source_is_exhausted() {
        let mut src = Cursor::new(Vec::new());
        let mut buf = [0u8; 8];
        assert!(matches!(
            fill_buffer(&mut src, &mut buf),
            Err(StreamError::SourceExhausted)
        ));
    }

    #[test]
    fn test_empty_destination_reads_nothing() {
        let mut src = Cursor::new(Vec::new());
        assert_eq!(fill_buffer(&mut src, &mut []).unwrap(), 0);
    }

    #[test]
    fn test_tolerates_one_byte_reads() {
        let mut src = ChunkedReader::new(b"hello world".to_vec(), 1);
        let mut buf = [0u8; 11];
        assert_eq!(fill_buffer(&mut src, &mut buf).unwrap(), 11);
        assert_eq!(&buf, b"hello world");
    }

    #[test]
    fn test_retries_interrupted() {
        let mut src = InterruptingReader::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 6];
        assert_eq!(fill_buffer(&mut src, &mut buf).unwrap(), 6);
        assert_eq!(&buf, b"abcdef");
    }

    #[test]
    fn test_read_error_after_data_is_returned() {
        let mut src = FailingReader::new(b"abc".to_vec(), io::ErrorKind::ConnectionReset);
        let mut buf = [0u8; 8];
        match fill_buffer(&mut src, &mut buf) {
            Err(StreamError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert_eq!(&buf[..3], b"abc");
    }
}
