//! Server-Sent-Events framing for the streamed completion body.
//!
//! The body arrives as arbitrary byte chunks. [`LineDecoder`] turns them into
//! text lines and [`parse_line`] classifies each line:
//!
//! ```text
//! data: {"choices":[{"delta":{"content":"Fix"}}]}
//!
//! data: {"choices":[{"delta":{"content":" typo\n"}}]}
//!
//! data: [DONE]
//! ```

use crate::llm::types::StreamChunk;

/// Prefix of data-bearing lines.
pub const DATA_PREFIX: &str = "data:";

/// Payload of the stream-termination line.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Classification of one line of the event stream.
#[derive(Debug)]
pub enum SseLine {
    /// Not a data line (blank separator, `event:`, comment, keep-alive).
    Ignored,
    /// A data line with nothing after the prefix.
    Empty,
    /// The `[DONE]` sentinel. Carries no payload.
    Done,
    /// A decoded event.
    Event(StreamChunk),
    /// A data line whose payload is not a valid event. Skipped by callers.
    Malformed(serde_json::Error),
}

/// Classify a single line (without its line terminator).
pub fn parse_line(line: &str) -> SseLine {
    let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
        return SseLine::Ignored;
    };

    let payload = rest.trim();
    if payload.is_empty() {
        return SseLine::Empty;
    }
    if payload == DONE_SENTINEL {
        return SseLine::Done;
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => SseLine::Event(chunk),
        Err(e) => SseLine::Malformed(e),
    }
}

/// Reassembles text lines from a sequence of byte chunks.
///
/// Bytes are buffered until a `\n` arrives, so a line (or a multi-byte
/// character) split across network chunks is decoded whole. A trailing `\r`
/// is dropped from each line.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8>,
    /// Start of the first unconsumed line.
    start: usize,
    /// Bytes before this offset are known to hold no `\n`.
    scanned: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of raw body bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        match self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let end = self.scanned + offset;
                let line = decode(&self.buf[self.start..end]);
                self.start = end + 1;
                self.scanned = self.start;
                Some(line)
            }
            None => {
                self.scanned = self.buf.len();
                None
            }
        }
    }

    /// Take whatever is left once the body is exhausted.
    pub fn finish(self) -> Option<String> {
        if self.start >= self.buf.len() {
            None
        } else {
            Some(decode(&self.buf[self.start..]))
        }
    }
}

fn decode(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
