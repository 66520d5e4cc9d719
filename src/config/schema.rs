//! Configuration schema definitions for dbguard.
//!
//! These structs map to the `dbguard.toml` file format:
//!
//! ```toml
//! [settings]
//! require_clean_git = true
//!
//! [environments.production]
//! project_ref = "abcd1234"
//! git_branches = ["main"]
//! protected_operations = ["push", "reset", "seed"]
//! ```

use serde::{Deserialize, Serialize};

/// Default downstream executable.
pub const DEFAULT_MIGRATION_CLI: &str = "supabase";

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Refuse destructive operations with uncommitted changes.
    pub require_clean_git: bool,

    /// Show a dry-run of `push` before asking for confirmation.
    pub show_diff: bool,

    /// Never prompt for an environment that could not be resolved.
    pub strict: bool,

    /// Executable of the migration CLI.
    pub migration_cli: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            require_clean_git: false,
            show_diff: true,
            strict: false,
            migration_cli: DEFAULT_MIGRATION_CLI.to_string(),
        }
    }
}

/// One `[environments.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Remote project identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ref: Option<String>,

    /// Branch patterns (`*` and `?` wildcards).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub git_branches: Vec<String>,

    /// Operations that need confirmation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protected_operations: Vec<String>,

    /// Confirmation phrase (defaults to the environment name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_word: Option<String>,

    /// Explicit lock state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// Top-level file layout before conversion into a registry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawConfig {
    pub settings: Settings,
    /// Kept as a table so declaration order survives deserialization.
    pub environments: toml::Table,
}
