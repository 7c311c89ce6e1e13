//! Line accumulation for a streamed commit message.
//!
//! Fragments are appended one character at a time. Every completed line is
//! echoed to the console as soon as its newline arrives and moved into the
//! full message; the unterminated tail waits in `current_line` until more
//! text or the end of the stream.

use std::io::{self, Write};

use tracing::debug;

use crate::llm::sse::{SseLine, parse_line};

/// Marker printed before each echoed line.
pub const LINE_MARKER: &str = "|";

/// What [`MessageAssembler::process_line`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a data line, an empty payload, or the `[DONE]` sentinel.
    Skipped,
    /// The payload did not decode as an event and was dropped.
    Malformed,
    /// The event was decoded and its fragments were appended.
    Applied,
}

/// Accumulator for one streaming call.
///
/// Invariant: `full_message + current_line` is every fragment received so
/// far, in arrival order.
pub struct MessageAssembler<W: Write> {
    out: W,
    full_message: String,
    current_line: String,
}

impl<W: Write> MessageAssembler<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            full_message: String::new(),
            current_line: String::new(),
        }
    }

    /// Handle one line of the event stream.
    pub fn process_line(&mut self, line: &str) -> io::Result<LineOutcome> {
        match parse_line(line) {
            SseLine::Ignored | SseLine::Empty | SseLine::Done => Ok(LineOutcome::Skipped),
            SseLine::Malformed(e) => {
                debug!("Skipping malformed stream event: {e}");
                Ok(LineOutcome::Malformed)
            }
            SseLine::Event(chunk) => {
                for choice in &chunk.choices {
                    if let Some(content) = choice.delta.content.as_deref() {
                        self.push_fragment(content)?;
                    }
                }
                Ok(LineOutcome::Applied)
            }
        }
    }

    /// Append a text fragment, echoing each line it completes.
    pub fn push_fragment(&mut self, fragment: &str) -> io::Result<()> {
        for ch in fragment.chars() {
            self.current_line.push(ch);
            if ch == '\n' {
                let line = std::mem::take(&mut self.current_line);
                writeln!(self.out, "{} {}", LINE_MARKER, line.strip_suffix('\n').unwrap_or(line.as_str()))?;
                self.full_message.push_str(&line);
            }
        }
        Ok(())
    }

    /// Text confirmed so far (completed lines only).
    pub fn full_message(&self) -> &str {
        &self.full_message
    }

    /// The unterminated tail.
    pub fn current_line(&self) -> &str {
        &self.current_line
    }

    /// Flush the residual tail and return the whole message.
    ///
    /// The residual is trimmed for display only; the returned message keeps
    /// it verbatim.
    pub fn finish(mut self) -> io::Result<String> {
        if !self.current_line.is_empty() {
            writeln!(self.out, "{} {}", LINE_MARKER, self.current_line.trim())?;
            self.full_message.push_str(&self.current_line);
        }
        self.out.flush()?;
        Ok(self.full_message)
    }
}
