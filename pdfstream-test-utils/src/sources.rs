//! Byte sources with awkward read behaviour

use std::collections::VecDeque;
use std::io::{self, Cursor, Read};

/// Returns at most `chunk` bytes per read call
pub struct ChunkedReader {
    inner: Cursor<Vec<u8>>,
    chunk: usize,
}

impl ChunkedReader {
    /// Serve `data` in reads of at most `chunk` bytes (minimum 1)
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            inner: Cursor::new(data),
            chunk: chunk.max(1),
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..len])
    }
}

/// Fails every other read with `ErrorKind::Interrupted`
pub struct InterruptingReader<R> {
    inner: R,
    interrupt_next: bool,
}

impl<R: Read> InterruptingReader<R> {
    /// Wrap `inner`; the first read is interrupted
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for InterruptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let interrupt = self.interrupt_next;
        self.interrupt_next = !interrupt;
        if interrupt {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        self.inner.read(buf)
    }
}

/// Serves `data`, then fails with `kind` instead of reporting end of input
pub struct FailingReader {
    inner: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Serve `data`, then fail every read with `kind`
    pub fn new(data: Vec<u8>, kind: io::ErrorKind) -> Self {
        Self {
            inner: Cursor::new(data),
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            return Err(io::Error::new(self.kind, "injected failure"));
        }
        Ok(n)
    }
}

/// Plays back a fixed script of read results, then reports end of input
pub struct ScriptedReader {
    steps: VecDeque<io::Result<Vec<u8>>>,
    pending: Vec<u8>,
}

impl ScriptedReader {
    /// Each step is either a chunk returned by one read or an error
    pub fn new(steps: Vec<io::Result<Vec<u8>>>) -> Self {
        Self {
            steps: steps.into(),
            pending: Vec::new(),
        }
    }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            match self.steps.pop_front() {
                None => return Ok(0),
                Some(Err(err)) => return Err(err),
                Some(Ok(chunk)) => self.pending = chunk,
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}
