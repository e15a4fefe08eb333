//! Property-based tests for marker primitives

use pdfstream_format::constants::{CR, END_STREAM_MARKER, LF};
use pdfstream_format::marker::{find_marker, trailing_eol_len, trim_trailing_eol};
use proptest::prelude::*;

fn framed(payload: &[u8], eols: &[u8], rest: &[u8]) -> Vec<u8> {
    let mut bytes = payload.to_vec();
    bytes.extend_from_slice(eols);
    bytes.extend_from_slice(END_STREAM_MARKER);
    bytes.extend_from_slice(rest);
    bytes
}

proptest! {
    #[test]
    fn marker_found_after_payload_and_eol_run(
        payload in prop::collection::vec(any::<u8>(), 0..512),
        eols in prop::collection::vec(prop::sample::select(vec![LF, CR]), 0..4),
        rest in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(find_marker(&payload).is_none());
        let bytes = framed(&payload, &eols, &rest);
        prop_assert_eq!(find_marker(&bytes), Some(payload.len() + eols.len()));
    }

    #[test]
    fn trimming_prefix_before_marker_recovers_payload(
        payload in prop::collection::vec(any::<u8>(), 0..512),
        eols in prop::collection::vec(prop::sample::select(vec![LF, CR]), 0..4),
    ) {
        prop_assume!(find_marker(&payload).is_none());
        prop_assume!(trailing_eol_len(&payload) == 0);
        let bytes = framed(&payload, &eols, b"\nendobj");
        let end = find_marker(&bytes).expect("marker present");
        let mut prefix = bytes[..end].to_vec();
        trim_trailing_eol(&mut prefix);
        prop_assert_eq!(prefix, payload);
    }
}
