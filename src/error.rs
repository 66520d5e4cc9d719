//! Error types for dbguard operations.
//!
//! This module defines [`DbGuardError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The resolver and the guards never fail; they return values
//! - Commands turn unresolved environments, blocked guards and declined
//!   confirmations into `DbGuardError` variants
//! - Only `main` maps an error to a process exit code via [`DbGuardError::exit_code`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dbguard operations.
#[derive(Debug, Error)]
pub enum DbGuardError {
    /// No configuration file could be found.
    #[error("No dbguard configuration found (searched from {searched})")]
    ConfigurationMissing { searched: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No environment matched the runtime signals.
    #[error("Could not determine the target environment from {signal}")]
    EnvironmentUnresolved { signal: String },

    /// An explicitly named environment is not configured.
    #[error("Unknown environment '{name}' (available: {})", available.join(", "))]
    EnvironmentUnknown {
        name: String,
        available: Vec<String>,
    },

    /// A guard refused the operation.
    #[error("Blocked on '{environment}': {reason}")]
    GuardBlocked {
        environment: String,
        reason: String,
        suggestions: Vec<String>,
    },

    /// The user (or CI mode) declined the confirmation.
    #[error("Operation not confirmed")]
    ConfirmationDeclined,

    /// The user cancelled the confirmation prompt.
    #[error("Operation cancelled")]
    ConfirmationCancelled,

    /// The downstream migration CLI is not installed.
    #[error("'{tool}' was not found on PATH. {install_hint}")]
    ExternalToolMissing { tool: String, install_hint: String },

    /// The downstream command ran and failed.
    #[error("Command failed ({}): {command}", describe_exit(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbGuardError {
    /// Process exit code for this error.
    ///
    /// A cancelled prompt is a deliberate user choice and exits cleanly.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfirmationCancelled => 0,
            Self::ConfigurationMissing { .. } => 2,
            Self::CommandFailed {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }

    /// Suggestions attached to the error, if any.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::GuardBlocked { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for dbguard operations.
pub type Result<T> = std::result::Result<T, DbGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_missing_displays_path() {
        let err = DbGuardError::ConfigurationMissing {
            searched: PathBuf::from("/work/app"),
        };
        assert!(err.to_string().contains("/work/app"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DbGuardError::ConfigParseError {
            path: PathBuf::from("/dbguard.toml"),
            message: "expected `=`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/dbguard.toml"));
        assert!(msg.contains("expected `=`"));
    }

    #[test]
    fn environment_unknown_lists_available_names() {
        let err = DbGuardError::EnvironmentUnknown {
            name: "prod".into(),
            available: vec!["local".into(), "staging".into(), "production".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'prod'"));
        assert!(msg.contains("local, staging, production"));
    }

    #[test]
    fn guard_blocked_displays_environment_and_reason() {
        let err = DbGuardError::GuardBlocked {
            environment: "production".into(),
            reason: "Environment 'production' is locked".into(),
            suggestions: vec!["dbguard unlock production".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("production"));
        assert!(msg.contains("is locked"));
        assert_eq!(err.suggestions().len(), 1);
    }

    #[test]
    fn external_tool_missing_includes_install_hint() {
        let err = DbGuardError::ExternalToolMissing {
            tool: "supabase".into(),
            install_hint: "Install it with: brew install supabase/tap/supabase".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("supabase"));
        assert!(msg.contains("brew install"));
    }

    #[test]
    fn cancelled_exits_zero_and_declined_exits_one() {
        assert_eq!(DbGuardError::ConfirmationCancelled.exit_code(), 0);
        assert_eq!(DbGuardError::ConfirmationDeclined.exit_code(), 1);
    }

    #[test]
    fn command_failed_propagates_exit_code() {
        let err = DbGuardError::CommandFailed {
            command: "supabase db push".into(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "Command failed (exit code 3): supabase db push"
        );

        let killed = DbGuardError::CommandFailed {
            command: "supabase db push".into(),
            code: None,
        };
        assert_eq!(killed.exit_code(), 1);
        assert!(killed.to_string().contains("terminated by signal"));
    }

    #[test]
    fn configuration_missing_exits_two() {
        let err = DbGuardError::ConfigurationMissing {
            searched: PathBuf::from("."),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn suggestions_empty_for_other_errors() {
        assert!(DbGuardError::ConfirmationDeclined.suggestions().is_empty());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DbGuardError = io_err.into();
        assert!(matches!(err, DbGuardError::Io(_)));
    }
}
