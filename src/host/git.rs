//! Git checkout inspection
//!
//! Local HEAD resolution goes through git2; remote HEAD resolution uses
//! `git ls-remote` so nothing has to be cloned just to compare SHAs.

use std::path::Path;

use git2::Repository;

use crate::error::{Result, RocstrapError};

/// HEAD SHA of the checkout at `dir`, `None` when no repository is there.
///
/// Absence is an expected outcome; only a repository that exists but has
/// an unresolvable HEAD is an error.
pub fn local_head(dir: &Path) -> Result<Option<String>> {
    if !dir.join(".git").exists() {
        return Ok(None);
    }

    let repo = Repository::open(dir)?;
    let head = repo.head()?;
    let commit = head.peel_to_commit()?;
    Ok(Some(commit.id().to_string()))
}

/// Parse one `git ls-remote` output line into a SHA
pub fn parse_ls_remote_sha(stdout: &str) -> Option<String> {
    let sha = stdout.lines().next()?.split_whitespace().next()?;
    if sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(sha.to_string())
    } else {
        None
    }
}

/// Map a git2 error into a clone failure with the URL attached
pub fn clone_error(url: &str, err: &git2::Error) -> RocstrapError {
    RocstrapError::GitCloneFailed {
        url: url.to_string(),
        reason: err.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_head_absent_checkout() {
        let temp = TempDir::new().unwrap();
        assert_eq!(local_head(temp.path()).unwrap(), None);
    }

    #[test]
    fn test_local_head_of_fresh_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let sha = commit_file(&repo, "a.txt", "hello");
        assert_eq!(local_head(temp.path()).unwrap(), Some(sha));
    }

    #[test]
    fn test_parse_ls_remote_sha() {
        let sha = "0123456789abcdef0123456789abcdef01234567";
        let output = format!("{sha}\trefs/heads/master\n");
        assert_eq!(parse_ls_remote_sha(&output), Some(sha.to_string()));
    }

    #[test]
    fn test_parse_ls_remote_rejects_garbage() {
        assert_eq!(parse_ls_remote_sha(""), None);
        assert_eq!(parse_ls_remote_sha("not-a-sha\trefs/heads/main\n"), None);
        assert_eq!(parse_ls_remote_sha("abc123\trefs/heads/main\n"), None);
    }

    fn commit_file(repo: &Repository, name: &str, content: &str) -> String {
        let workdir = repo.workdir().unwrap();
        std::fs::write(workdir.join(name), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("test", "test@example.com").unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        oid.to_string()
    }
}
