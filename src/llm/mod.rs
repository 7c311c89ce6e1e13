//! DeepSeek streaming client and the response assembler.

pub mod assembler;
pub mod client;
pub mod sse;
pub mod types;

pub use assembler::{LINE_MARKER, LineOutcome, MessageAssembler};
pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DeepSeekClient};
pub use sse::{LineDecoder, SseLine, parse_line};
pub use types::{ChatMessage, ChatRequest, Delta, InstructionSet, Role, StreamChoice, StreamChunk};
