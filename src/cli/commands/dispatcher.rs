//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, GuardedArgs};
use crate::error::Result;
use crate::operation::OperationKind;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::context::CommandContext;
use super::envs::EnvsCommand;
use super::guarded::GuardedCommand;
use super::lock::LockCommand;
use super::status::StatusCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher over a command context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    fn guarded(
        &self,
        operation: OperationKind,
        args: &GuardedArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        GuardedCommand::new(&self.context, operation, args.clone()).execute(ui)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Push(args) => self.guarded(OperationKind::Push, args, ui),
            Commands::Reset(args) => self.guarded(OperationKind::Reset, args, ui),
            Commands::Seed(args) => self.guarded(OperationKind::Seed, args, ui),
            Commands::Migrate(args) => self.guarded(OperationKind::Migrate, args, ui),
            Commands::Pull(args) => self.guarded(OperationKind::Pull, args, ui),
            Commands::Diff(args) => self.guarded(OperationKind::Diff, args, ui),
            Commands::Link(args) => self.guarded(OperationKind::Link, args, ui),
            Commands::Unlink(args) => self.guarded(OperationKind::Unlink, args, ui),
            Commands::Lock(args) => LockCommand::lock(&self.context, args.clone()).execute(ui),
            Commands::Unlock(args) => LockCommand::unlock(&self.context, args.clone()).execute(ui),
            Commands::Status(args) => StatusCommand::new(&self.context, args.clone()).execute(ui),
            Commands::Envs => EnvsCommand::new(&self.context).execute(ui),
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}
