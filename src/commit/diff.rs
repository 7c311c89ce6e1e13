//! Staged diff collection using git2.

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};

use crate::error::CommitError;

/// Staged changes (HEAD tree vs. index), as `git diff --cached` prints them.
#[derive(Debug, Clone)]
pub struct StagedDiff {
    pub diff_text: String,
    pub files_changed: usize,
    pub additions: usize,
    pub deletions: usize,
}

/// Open the repository containing the current directory.
pub fn open_repository() -> Result<Repository, CommitError> {
    Repository::discover(".").map_err(CommitError::OpenRepository)
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, CommitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CommitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(CommitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff as unified patch text.
///
/// Unstaged and untracked changes are not included. Returns
/// `CommitError::NoStagedChanges` when the index matches HEAD.
pub fn collect_staged_diff(repo: &Repository) -> Result<StagedDiff, CommitError> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(CommitError::DiffFailed)?;

    let files_changed = diff.deltas().len();
    if files_changed == 0 {
        return Err(CommitError::NoStagedChanges);
    }

    let (diff_text, additions, deletions) = patch_text(&diff)?;
    if diff_text.is_empty() {
        return Err(CommitError::NoStagedChanges);
    }

    Ok(StagedDiff {
        diff_text,
        files_changed,
        additions,
        deletions,
    })
}

/// Render a diff in patch format, counting added and removed lines.
fn patch_text(diff: &Diff<'_>) -> Result<(String, usize, usize), CommitError> {
    let mut text = String::new();
    let mut additions = 0usize;
    let mut deletions = 0usize;

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        match origin {
            '+' => additions += 1,
            '-' => deletions += 1,
            _ => {}
        }

        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(CommitError::DiffFailed)?;

    Ok((text, additions, deletions))
}
