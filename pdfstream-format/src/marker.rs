//! Terminator marker search and EOL trimming on byte slices

use memchr::memmem;

use crate::constants::{CR, END_STREAM_MARKER, LF};

/// Returns true for `\n` and `\r`.
#[inline]
pub fn is_eol(byte: u8) -> bool {
    byte == LF || byte == CR
}

/// Offset of the first `endstream` in `buf`.
pub fn find_marker(buf: &[u8]) -> Option<usize> {
    memmem::find(buf, END_STREAM_MARKER)
}

/// Offset of the first `endstream` starting at or after `from`.
///
/// Used when `buf[..from]` is already known to hold no complete marker: a
/// caller that appended new bytes at `old_len` passes
/// [`rescan_start`]`(old_len)` so a marker straddling the boundary is found.
pub fn find_marker_from(buf: &[u8], from: usize) -> Option<usize> {
    let from = from.min(buf.len());
    memmem::find(&buf[from..], END_STREAM_MARKER).map(|i| from + i)
}

/// First offset that must be rescanned after appending to a buffer whose
/// previous `old_len` bytes contained no marker.
#[inline]
pub fn rescan_start(old_len: usize) -> usize {
    old_len.saturating_sub(END_STREAM_MARKER.len() - 1)
}

/// Length of the run of EOL bytes at the end of `buf`.
pub fn trailing_eol_len(buf: &[u8]) -> usize {
    buf.iter().rev().take_while(|&&b| is_eol(b)).count()
}

/// Drop the trailing EOL run in place.
pub fn trim_trailing_eol(buf: &mut Vec<u8>) {
    let run = trailing_eol_len(buf);
    buf.truncate(buf.len() - run);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_find_marker() {
        assert_eq!(find_marker(b"AB\r\nendstreamXYZ"), Some(4));
        assert_eq!(find_marker(b"endstream"), Some(0));
        assert_eq!(find_marker(b"endstrea"), None);
        assert_eq!(find_marker(b""), None);
        assert_eq!(find_marker(b"xxendstreamendstream"), Some(2));
    }

    #[test]
    fn test_find_marker_from() {
        let buf = b"endstream..endstream";
        assert_eq!(find_marker_from(buf, 0), Some(0));
        assert_eq!(find_marker_from(buf, 1), Some(11));
        assert_eq!(find_marker_from(buf, 100), None);
    }

    #[test]
    fn test_rescan_start_covers_straddle() {
        // "endst" | "ream": old content ends mid-marker
        let buf = b"0123456789endstream";
        let old_len = 15;
        assert_eq!(find_marker(&buf[..old_len]), None);
        assert_eq!(find_marker_from(buf, rescan_start(old_len)), Some(10));
        assert_eq!(rescan_start(3), 0);
    }

    #[test]
    fn test_trim_trailing_eol() {
        let mut buf = b"AB\r\n\n\r".to_vec();
        trim_trailing_eol(&mut buf);
        assert_eq!(buf, b"AB");

        let mut buf = b"A\nB".to_vec();
        trim_trailing_eol(&mut buf);
        assert_eq!(buf, b"A\nB");

        let mut buf = b"\r\n".to_vec();
        trim_trailing_eol(&mut buf);
        assert!(buf.is_empty());
    }

    proptest! {
        #[test]
        fn prop_incremental_search_matches_full_search(
            data in prop::collection::vec(prop::sample::select(b"endstram\n".to_vec()), 0..200),
            split in 0usize..200,
        ) {
            let split = split.min(data.len());
            let full = find_marker(&data);
            let incremental = match find_marker(&data[..split]) {
                Some(i) => Some(i),
                None => find_marker_from(&data, rescan_start(split)),
            };
            prop_assert_eq!(full, incremental);
        }

        #[test]
        fn prop_trim_removes_only_eol(
            body in prop::collection::vec(any::<u8>(), 0..64),
            eols in prop::collection::vec(prop::sample::select(vec![LF, CR]), 0..8),
        ) {
            prop_assume!(body.last().map_or(true, |&b| !is_eol(b)));
            let mut buf = body.clone();
            buf.extend_from_slice(&eols);
            trim_trailing_eol(&mut buf);
            prop_assert_eq!(buf, body);
        }
    }
}
