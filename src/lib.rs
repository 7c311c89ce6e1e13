//! git-aicommit - A CLI tool that writes commit messages for staged changes.
//!
//! # Overview
//!
//! git-aicommit reads the staged diff, asks the DeepSeek chat-completion API
//! for a commit message, echoes the message line by line as it streams in,
//! and can create the commit with it.

pub mod commit;
pub mod config;
pub mod error;
pub mod llm;
pub mod ui;

// Re-export commonly used types
pub use commit::{StagedDiff, build_prompt_messages, collect_staged_diff, create_commit};
pub use config::{Config, DeepSeekConfig, LoadedConfig};
pub use error::{CommitError, ConfigError, StreamError};
pub use llm::{ChatMessage, DeepSeekClient, InstructionSet, MessageAssembler, Role};
