//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// dbguard - Safety guard for database migration CLIs.
#[derive(Debug, Parser)]
#[command(name = "dbguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovery of dbguard.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; confirmations are declined
    #[arg(long, global = true)]
    pub ci: bool,

    /// Skip confirmation prompts (guards still apply)
    #[arg(short, long, global = true, env = "DBGUARD_YES")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply local migrations to the target database
    Push(GuardedArgs),

    /// Reset the target database (destroys data)
    Reset(GuardedArgs),

    /// Run seed scripts against the target database
    Seed(GuardedArgs),

    /// Apply pending migrations
    Migrate(GuardedArgs),

    /// Pull the remote schema into a new migration
    Pull(GuardedArgs),

    /// Diff the local schema against the target database
    Diff(GuardedArgs),

    /// Link the project to the environment's remote project
    Link(GuardedArgs),

    /// Unlink the remote project
    Unlink(GuardedArgs),

    /// Lock an environment against destructive operations
    Lock(LockArgs),

    /// Unlock an environment
    Unlock(LockArgs),

    /// Show the resolved environment and runtime signals
    Status(StatusArgs),

    /// List configured environments
    Envs,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by every guarded operation.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GuardedArgs {
    /// Target environment (skips branch and project detection)
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,

    /// Extra arguments passed through to the migration CLI
    #[arg(last = true, value_name = "ARGS")]
    pub passthrough: Vec<String>,
}

/// Arguments for the `lock` and `unlock` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LockArgs {
    /// Environment to change (defaults to the resolved environment)
    #[arg(value_name = "ENV")]
    pub env: Option<String>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Target environment (skips branch and project detection)
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
