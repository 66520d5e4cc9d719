//! Migration CLI execution.
//!
//! The migration CLI is a black box: dbguard passes arguments through,
//! lets it talk to the terminal directly and only looks at the exit code.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{DbGuardError, Result};

/// Result of running the migration CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,
}

impl CliOutput {
    /// Whether the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes the downstream migration CLI.
pub trait MigrationCli {
    /// Executable name, for messages.
    fn program(&self) -> &str;

    /// Run with the given arguments.
    fn run(&self, args: &[String]) -> Result<CliOutput>;
}

/// Runs the migration CLI as a child process.
#[derive(Debug, Clone)]
pub struct SystemMigrationCli {
    program: String,
    cwd: PathBuf,
    capture: bool,
}

impl SystemMigrationCli {
    /// Pass-through execution in `cwd`.
    pub fn new(program: &str, cwd: &Path) -> Self {
        Self {
            program: program.to_string(),
            cwd: cwd.to_path_buf(),
            capture: false,
        }
    }

    /// Capture stdout/stderr instead of inheriting them.
    pub fn capturing(mut self) -> Self {
        self.capture = true;
        self
    }

    fn missing(&self) -> DbGuardError {
        DbGuardError::ExternalToolMissing {
            tool: self.program.clone(),
            install_hint: install_hint(&self.program),
        }
    }
}

impl MigrationCli for SystemMigrationCli {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> Result<CliOutput> {
        info!("Running: {} {}", self.program, args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.cwd).stdin(Stdio::inherit());

        let spawned = if self.capture {
            cmd.output().map(|output| CliOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        } else {
            cmd.stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map(|status| CliOutput {
                    exit_code: status.code(),
                    stdout: String::new(),
                    stderr: String::new(),
                })
        };

        match spawned {
            Ok(output) => {
                debug!("{} exited with {:?}", self.program, output.exit_code);
                Ok(output)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(self.missing()),
            Err(e) => Err(DbGuardError::Io(e)),
        }
    }
}

/// How to install a missing migration CLI.
pub fn install_hint(program: &str) -> String {
    match program {
        "supabase" => "Install it from https://supabase.com/docs/guides/cli \
                       (e.g. `brew install supabase/tap/supabase` or `npm i -D supabase`)."
            .to_string(),
        _ => "Install it, or set `migration_cli` under [settings] in dbguard.toml.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_reported() {
        let temp = TempDir::new().unwrap();
        let cli = SystemMigrationCli::new("dbguard-test-no-such-tool", temp.path());
        match cli.run(&["db".to_string(), "push".to_string()]) {
            Err(DbGuardError::ExternalToolMissing { tool, install_hint }) => {
                assert_eq!(tool, "dbguard-test-no-such-tool");
                assert!(install_hint.contains("migration_cli"));
            }
            other => panic!("expected ExternalToolMissing, got {:?}", other),
        }
    }

    #[test]
    fn supabase_hint_mentions_install() {
        assert!(install_hint("supabase").contains("brew install"));
    }

    #[cfg(unix)]
    #[test]
    fn reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let cli = SystemMigrationCli::new("sh", temp.path()).capturing();
        let output = cli
            .run(&["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()])
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn success_on_zero_exit() {
        let temp = TempDir::new().unwrap();
        let cli = SystemMigrationCli::new("true", temp.path()).capturing();
        assert!(cli.run(&[]).unwrap().success());
    }
}
