//! Repository root discovery.

use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};

/// Name of the version-control marker searched for.
pub const REPO_MARKER: &str = ".git";

/// Name of the store file kept at the repository root.
pub const STORE_FILE_NAME: &str = ".issue_tracker.json";

/// Walk upward from `start` until a directory containing [`REPO_MARKER`] is found.
///
/// The marker may be a directory or a file (worktrees and submodules use a
/// `.git` file). `start` itself is checked first.
///
/// # Errors
///
/// Returns `NotARepository` when the filesystem root is reached without a match.
pub fn find_repo_root(start: &Path) -> Result<PathBuf> {
    let mut dir = start.to_path_buf();

    loop {
        if dir.join(REPO_MARKER).exists() {
            tracing::debug!(root = %dir.display(), "Found repository root");
            return Ok(dir);
        }

        if !dir.pop() {
            break;
        }
    }

    Err(TrackerError::NotARepository {
        start: start.to_path_buf(),
    })
}

/// Path of the store file for a repository root.
#[must_use]
pub fn store_path(root: &Path) -> PathBuf {
    root.join(STORE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_marker_in_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let root = find_repo_root(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_walks_upward() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("src/deep/er");
        fs::create_dir_all(&nested).unwrap();

        let root = find_repo_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_nearest_marker_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let sub = dir.path().join("vendor/sub");
        fs::create_dir_all(sub.join(".git")).unwrap();

        assert_eq!(find_repo_root(&sub).unwrap(), sub);
        assert_eq!(find_repo_root(&dir.path().join("vendor")).unwrap(), dir.path());
    }

    #[test]
    fn test_git_file_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: ../elsewhere").unwrap();

        assert_eq!(find_repo_root(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn test_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        // The temp dir lives outside any repository unless the test host puts
        // one above it; only assert the error shape when that holds.
        if let Err(err) = find_repo_root(&nested) {
            assert!(matches!(err, TrackerError::NotARepository { ref start } if start == &nested));
        }
    }

    #[test]
    fn test_store_path() {
        let p = store_path(Path::new("/work/repo"));
        assert_eq!(p, Path::new("/work/repo/.issue_tracker.json"));
    }
}
