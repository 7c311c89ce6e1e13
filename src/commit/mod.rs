//! Staged changes in, commit out.

pub mod apply;
pub mod diff;
pub mod prompt;

pub use apply::create_commit;
pub use diff::{StagedDiff, collect_staged_diff, open_repository};
pub use prompt::{DEFAULT_PROMPT, build_prompt_messages};
