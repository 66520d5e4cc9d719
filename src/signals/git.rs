//! Git-backed [`SourceControl`].

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::SourceControl;

/// Queries the system `git` binary in a project directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Run git and return stdout, or `None` if it could not run or failed.
    fn run(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| debug!("git {:?} could not run: {}", args, e))
            .ok()?;

        if !output.status.success() {
            debug!("git {:?} exited with {:?}", args, output.status.code());
            return None;
        }

        String::from_utf8(output.stdout).ok()
    }
}

impl SourceControl for GitCli {
    fn current_branch(&self) -> Option<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .and_then(|out| parse_branch(&out))
    }

    fn is_dirty(&self) -> bool {
        self.run(&["status", "--porcelain"])
            .map(|out| is_dirty_status(&out))
            .unwrap_or(false)
    }
}

/// Parse `git rev-parse --abbrev-ref HEAD` output.
fn parse_branch(output: &str) -> Option<String> {
    match output.trim() {
        "" | "HEAD" => None,
        branch => Some(branch.to_string()),
    }
}

/// Porcelain status lists one line per changed path.
fn is_dirty_status(output: &str) -> bool {
    output.lines().any(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_branch_name() {
        assert_eq!(parse_branch("feature/auth\n"), Some("feature/auth".to_string()));
    }

    #[test]
    fn detached_head_is_no_branch() {
        assert_eq!(parse_branch("HEAD\n"), None);
        assert_eq!(parse_branch(""), None);
    }

    #[test]
    fn porcelain_output_marks_dirty() {
        assert!(is_dirty_status(" M src/lib.rs\n?? notes.txt\n"));
        assert!(!is_dirty_status(""));
        assert!(!is_dirty_status("\n"));
    }

    #[test]
    fn outside_a_repository_has_no_signals() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new(temp.path());
        assert_eq!(git.current_branch(), None);
        assert!(!git.is_dirty());
    }
}
