use crate::domain::error::{AtLinkError, AtLinkResult};

/// Terminator closing a successful AT response.
pub const RESPONSE_TERMINATOR: &[u8] = b"\r\nOK\r\n";

/// Result of feeding bytes into the framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameProgress {
    /// A full response arrived. `consumed` counts the payload plus the
    /// terminator; bytes that trailed the terminator stay buffered.
    Complete { payload: Vec<u8>, consumed: usize },
    /// The terminator has not been seen yet.
    Incomplete,
}

/// Buffers successive reads and extracts the payload once the terminator
/// appears. The terminator is located by explicit search from the front of
/// the buffer, so correctness does not depend on it being the last thing
/// received.
pub struct ResponseFramer {
    buffer: Vec<u8>,
    max_len: usize,
}

impl ResponseFramer {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
            max_len,
        }
    }

    /// Append freshly read bytes and check for a complete response.
    ///
    /// Growth past `max_len` without a terminator is a `ProtocolViolation`;
    /// the buffer is never allowed to accumulate without bound.
    pub fn push(&mut self, bytes: &[u8]) -> AtLinkResult<FrameProgress> {
        self.buffer.extend_from_slice(bytes);

        if let Some(at) = find_terminator(&self.buffer) {
            let payload = self.buffer[..at].to_vec();
            let consumed = at + RESPONSE_TERMINATOR.len();
            self.buffer.drain(..consumed);
            return Ok(FrameProgress::Complete { payload, consumed });
        }

        if self.buffer.len() > self.max_len {
            return Err(AtLinkError::ProtocolViolation {
                message: format!(
                    "{} bytes buffered without a terminator (limit {})",
                    self.buffer.len(),
                    self.max_len
                ),
            });
        }

        Ok(FrameProgress::Incomplete)
    }

    /// Bytes currently buffered and not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

fn find_terminator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(RESPONSE_TERMINATOR.len())
        .position(|window| window == RESPONSE_TERMINATOR)
}
