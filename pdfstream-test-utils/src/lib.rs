//! pdfstream Test Utilities
//!
//! Shared sources and document builders for the pdfstream test suites.

pub mod sources;

/// Builder for a single indirect stream object
///
/// Produces `N 0 obj\n<< /Length L >>\nstream\n{payload}{eol}endstream\nendobj\n`
/// and records where the payload starts.
pub struct StreamDocumentBuilder {
    object_number: u32,
    prefix: Vec<u8>,
    payload: Vec<u8>,
    eol: Vec<u8>,
    declared_len: Option<usize>,
    terminated: bool,
}

/// A built document and the location of its payload
pub struct StreamDocument {
    /// Full document bytes
    pub bytes: Vec<u8>,
    /// Offset of the first payload byte
    pub payload_offset: u64,
    /// Length written into the dictionary, if any
    pub declared_len: Option<usize>,
}

impl StreamDocumentBuilder {
    /// Create a builder for object 1 with an empty payload
    pub fn new() -> Self {
        Self {
            object_number: 1,
            prefix: b"%PDF-1.7\n".to_vec(),
            payload: Vec::new(),
            eol: b"\n".to_vec(),
            declared_len: None,
            terminated: true,
        }
    }

    /// Set the object number
    pub fn object_number(mut self, number: u32) -> Self {
        self.object_number = number;
        self
    }

    /// Set the bytes placed before the object
    pub fn prefix(mut self, prefix: &[u8]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    /// Set the payload bytes
    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    /// Set the EOL run between payload and `endstream`
    pub fn eol(mut self, eol: &[u8]) -> Self {
        self.eol = eol.to_vec();
        self
    }

    /// Write `/Length` into the dictionary
    pub fn declared_len(mut self, len: usize) -> Self {
        self.declared_len = Some(len);
        self
    }

    /// Write the true payload length into the dictionary
    pub fn correct_len(mut self) -> Self {
        self.declared_len = Some(self.payload.len());
        self
    }

    /// Omit `endstream` and everything after the payload
    pub fn truncated(mut self) -> Self {
        self.terminated = false;
        self
    }

    /// Assemble the document
    pub fn build(self) -> StreamDocument {
        let mut bytes = self.prefix;
        bytes.extend_from_slice(format!("{} 0 obj\n", self.object_number).as_bytes());
        match self.declared_len {
            Some(len) => bytes.extend_from_slice(format!("<< /Length {} >>\n", len).as_bytes()),
            None => bytes.extend_from_slice(b"<< >>\n"),
        }
        bytes.extend_from_slice(b"stream\n");
        let payload_offset = bytes.len() as u64;
        bytes.extend_from_slice(&self.payload);
        if self.terminated {
            bytes.extend_from_slice(&self.eol);
            bytes.extend_from_slice(b"endstream\nendobj\n");
        }

        StreamDocument {
            bytes,
            payload_offset,
            declared_len: self.declared_len,
        }
    }
}

impl Default for StreamDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate payloads with various patterns
pub struct PayloadGenerator;

impl PayloadGenerator {
    /// Deterministic binary bytes that never contain `endstream`
    pub fn binary(len: usize) -> Vec<u8> {
        // No ASCII letters, so the marker cannot appear
        (0..len).map(|i| (i * 7 % 64) as u8 + 0x80).collect()
    }

    /// Text lines ending without a trailing EOL
    pub fn text_lines(lines: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for i in 0..lines {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(format!("BT /F1 12 Tf 72 {} Td (line {}) Tj ET", 700 - i, i).as_bytes());
        }
        out
    }

    /// Payload whose `endstream` marker, once framed with `eol`, straddles
    /// the `increment` boundary
    pub fn straddling(increment: usize, eol: &[u8]) -> Vec<u8> {
        let len = increment.saturating_sub(eol.len() + 4);
        Self::binary(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_payload_offset() {
        let doc = StreamDocumentBuilder::new()
            .payload(b"HELLO")
            .correct_len()
            .build();
        let start = doc.payload_offset as usize;
        assert_eq!(&doc.bytes[start..start + 5], b"HELLO");
        assert_eq!(doc.declared_len, Some(5));
        assert!(doc.bytes.ends_with(b"HELLO\nendstream\nendobj\n"));
    }

    #[test]
    fn truncated_document_has_no_marker() {
        let doc = StreamDocumentBuilder::new().payload(b"abc").truncated().build();
        assert!(doc.bytes.ends_with(b"stream\nabc"));
    }

    #[test]
    fn binary_payload_has_no_letters() {
        assert!(PayloadGenerator::binary(4096)
            .iter()
            .all(|b| !b.is_ascii_alphabetic()));
    }
}
