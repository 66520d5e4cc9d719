//! Process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{install_hint, CliOutput, MigrationCli, SystemMigrationCli};
pub use platform::{is_ci, is_ci_with_env};
