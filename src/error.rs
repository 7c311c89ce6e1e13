//! Error types for git-aicommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or bootstrapping the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("home directory not found")]
    NoHomeDir,

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error(
        "No DeepSeek API key found. Please set your API key in the config file: {}",
        path.display()
    )]
    MissingApiKey { path: PathBuf },
}

/// Errors from reading staged changes and creating commits.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Not a git repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("No staged changes found")]
    NoStagedChanges,

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    Signature(#[source] git2::Error),
}

/// Errors from the streamed chat-completion request.
///
/// A malformed individual event is not an error; it is skipped while the
/// stream keeps going (see [`crate::llm::sse::SseLine::Malformed`]).
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Request to the completion endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response stream: {0}")]
    Read(#[source] reqwest::Error),

    #[error("Failed to write to console: {0}")]
    Console(#[source] std::io::Error),
}
