//! Cancellable sources for bounding blocking extraction

use std::fmt;
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pdfstream_format::StreamError;

/// Shared flag that stops reads on every [`CancellableReader`] holding a clone
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the running state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; subsequent reads fail
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Why a [`CancellableReader`] refused to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The token was cancelled
    Cancelled,
    /// The deadline passed
    DeadlineExceeded,
}

#[derive(Debug)]
struct Stopped(StopReason);

impl fmt::Display for Stopped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            StopReason::Cancelled => f.write_str("read cancelled"),
            StopReason::DeadlineExceeded => f.write_str("read deadline exceeded"),
        }
    }
}

impl std::error::Error for Stopped {}

/// Reader wrapper checked against a [`CancelToken`] and optional deadline
/// before every read.
///
/// The check happens between reads; a read already blocked in the inner
/// source is not interrupted.
pub struct CancellableReader<R> {
    inner: R,
    token: CancelToken,
    deadline: Option<Instant>,
}

impl<R: Read> CancellableReader<R> {
    /// Wrap `inner`, stopping once `token` is cancelled
    pub fn new(inner: R, token: CancelToken) -> Self {
        Self {
            inner,
            token,
            deadline: None,
        }
    }

    /// Wrap `inner`, also stopping once `deadline` has passed
    pub fn with_deadline(inner: R, token: CancelToken, deadline: Instant) -> Self {
        Self {
            inner,
            token,
            deadline: Some(deadline),
        }
    }

    /// Wrap `inner` with a deadline `timeout` from now
    pub fn with_timeout(inner: R, token: CancelToken, timeout: Duration) -> Self {
        Self::with_deadline(inner, token, Instant::now() + timeout)
    }

    /// The token this reader observes
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Unwrap the inner source
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if self.token.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::DeadlineExceeded),
            _ => None,
        }
    }
}

impl<R: Read> Read for CancellableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(reason) = self.stop_reason() {
            let kind = match reason {
                StopReason::Cancelled => io::ErrorKind::Other,
                StopReason::DeadlineExceeded => io::ErrorKind::TimedOut,
            };
            return Err(io::Error::new(kind, Stopped(reason)));
        }
        self.inner.read(buf)
    }
}

/// Map a read error to a [`StreamError`], recognising stops raised by
/// [`CancellableReader`].
pub(crate) fn classify_io(err: io::Error) -> StreamError {
    let reason = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<Stopped>())
        .map(|stopped| stopped.0);

    match reason {
        Some(StopReason::Cancelled) => StreamError::Cancelled,
        Some(StopReason::DeadlineExceeded) => StreamError::DeadlineExceeded,
        None => StreamError::Io(err),
    }
}
