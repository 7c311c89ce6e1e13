//! Prompt construction for AI-generated commit messages.

use crate::llm::types::InstructionSet;

/// Instructions used when the config does not provide a prompt.
pub const DEFAULT_PROMPT: &str = r#"
You are an AI commit message assistant.

Please generate a commit message with the following format:
1. Title (one short sentence, 50-72 characters max).
2. A clear bullet-point list of changes (start each line with "- ").
3. Each line, including bullets, should be under 100 characters.
4. Keep it concise, consistent, and professional.

Example:

Improve error handling in user authentication

- Add detailed error messages for login failures
- Handle timeout errors gracefully
- Refactor error propagation logic for clarity
"#;

/// Label placed before the diff in the user message.
pub const CHANGES_LABEL: &str = "Here are my current Git changes:";

/// Build the system + user messages for a staged diff.
///
/// A custom prompt replaces the default instructions unless it is empty.
pub fn build_prompt_messages(changes: &str, custom_prompt: Option<&str>) -> InstructionSet {
    let instructions = match custom_prompt {
        Some(p) if !p.is_empty() => p,
        _ => DEFAULT_PROMPT,
    };

    InstructionSet::new(instructions, format!("{CHANGES_LABEL}\n{changes}"))
}
