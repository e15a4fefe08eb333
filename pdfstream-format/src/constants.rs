//! Constants for stream framing

/// Keyword terminating a stream payload: "endstream"
pub const END_STREAM_MARKER: &[u8] = b"endstream";

/// Default number of bytes read per growth step in blind mode.
pub const DEFAULT_INCREMENT: usize = 1024;

/// Line feed.
pub const LF: u8 = 0x0A;
/// Carriage return.
pub const CR: u8 = 0x0D;

/// Declared length sentinel meaning "unknown, scan for the marker".
pub const UNKNOWN_LENGTH: usize = 0;
