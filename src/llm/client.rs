//! Streamed chat-completion requests against the DeepSeek API.

use std::io::Write;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::StreamError;
use crate::llm::assembler::{LineOutcome, MessageAssembler};
use crate::llm::sse::LineDecoder;
use crate::llm::types::{ChatRequest, InstructionSet};

/// Chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";

/// Model used for commit message generation.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// HTTP client for the completions endpoint.
///
/// Holds its own `reqwest::Client`; pass it to whatever needs to stream.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl Default for DeepSeekClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DeepSeekClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a different URL (used by tests against a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Stream a commit message, echoing each completed line to `out`.
    ///
    /// Returns the concatenation of every received fragment. Any failure
    /// aborts the call with no partial message; malformed events are skipped.
    pub async fn stream_commit_message<W: Write>(
        &self,
        api_key: &str,
        messages: &InstructionSet,
        temperature: Option<f32>,
        out: W,
    ) -> Result<String, StreamError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: true,
            temperature,
        };
        let body = serde_json::to_vec(&request).map_err(StreamError::Serialize)?;

        debug!(
            "POST {} (model={}, {} bytes, temperature={:?})",
            self.endpoint,
            self.model,
            body.len(),
            temperature
        );

        let mut response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key)
            .body(body)
            .send()
            .await
            .map_err(StreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(StreamError::Read)?;
            return Err(StreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut assembler = MessageAssembler::new(out);
        let mut decoder = LineDecoder::new();
        let mut malformed = 0usize;

        while let Some(chunk) = response.chunk().await.map_err(StreamError::Read)? {
            decoder.push(&chunk);
            while let Some(line) = decoder.next_line() {
                if assembler.process_line(&line).map_err(StreamError::Console)?
                    == LineOutcome::Malformed
                {
                    malformed += 1;
                }
            }
        }
        if let Some(line) = decoder.finish() {
            if assembler.process_line(&line).map_err(StreamError::Console)?
                == LineOutcome::Malformed
            {
                malformed += 1;
            }
        }

        if malformed > 0 {
            debug!("Skipped {} malformed stream event(s)", malformed);
        }

        assembler.finish().map_err(StreamError::Console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client_targets_deepseek() {
        let client = DeepSeekClient::new();
        assert_eq!(client.endpoint(), "https://api.deepseek.com/chat/completions");
        assert_eq!(client.model(), "deepseek-chat");
    }

    #[test]
    fn test_with_endpoint_overrides_url() {
        let client = DeepSeekClient::new().with_endpoint("http://127.0.0.1:9/v1");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        // Port 9 (discard) is not listening on loopback in test environments
        let client = DeepSeekClient::new().with_endpoint("http://127.0.0.1:9/chat/completions");
        let messages = InstructionSet::new("system", "user");
        let mut out = Vec::new();
        let result = client
            .stream_commit_message("key", &messages, None, &mut out)
            .await;
        assert!(
            matches!(result, Err(StreamError::Transport(_))),
            "Expected Transport error, got: {:?}",
            result
        );
        assert!(out.is_empty());
    }
}
