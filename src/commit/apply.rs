//! Commit creation from the staged index.

use git2::{ErrorCode, Oid, Repository};
use tracing::debug;

use crate::error::CommitError;

/// Create a commit on HEAD from the current index.
///
/// Author and committer come from the repository's git config
/// (`user.name` / `user.email`). On an unborn branch the commit has no parent.
pub fn create_commit(repo: &Repository, message: &str) -> Result<Oid, CommitError> {
    let mut index = repo.index().map_err(CommitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

    let sig = repo.signature().map_err(CommitError::Signature)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(CommitError::CommitFailed)?),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(CommitError::CommitFailed(e)),
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(CommitError::CommitFailed)?;

    debug!("Created commit {} with {} parent(s)", oid, parents.len());
    Ok(oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn configured_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@test.com").unwrap();
        }
        (dir, repo)
    }

    fn stage(dir: &Path, repo: &Repository, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_first_commit_has_no_parent() {
        let (dir, repo) = configured_repo();
        stage(dir.path(), &repo, "a.txt", "a\n");

        let oid = create_commit(&repo, "Add a").unwrap();
        let commit = repo.find_commit(oid).unwrap();
        assert_eq!(commit.message().unwrap(), "Add a");
        assert_eq!(commit.parent_count(), 0);
        assert_eq!(commit.author().name(), Some("Test User"));
        assert_eq!(commit.author().email(), Some("test@test.com"));
    }

    #[test]
    fn test_commit_uses_head_as_parent_and_index_as_tree() {
        let (dir, repo) = configured_repo();
        stage(dir.path(), &repo, "a.txt", "a\n");
        let first = create_commit(&repo, "Add a").unwrap();

        stage(dir.path(), &repo, "b.txt", "b\n");
        // Unstaged edit must not end up in the commit
        std::fs::write(dir.path().join("a.txt"), "changed\n").unwrap();

        let second = create_commit(&repo, "Add b\n\n- details").unwrap();
        let commit = repo.find_commit(second).unwrap();
        assert_eq!(commit.parent_id(0).unwrap(), first);
        assert_eq!(commit.message().unwrap(), "Add b\n\n- details");

        let tree = commit.tree().unwrap();
        assert!(tree.get_name("b.txt").is_some());
        let blob = repo
            .find_blob(tree.get_name("a.txt").unwrap().id())
            .unwrap();
        assert_eq!(blob.content(), b"a\n");

        assert_eq!(repo.head().unwrap().target(), Some(second));
    }
}
