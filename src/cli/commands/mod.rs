//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. They share one [`CommandContext`]
//! holding the config provider, the memoized runtime signals and the
//! migration CLI factory.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod envs;
pub mod guarded;
pub mod lock;
pub mod status;

pub use context::CommandContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use guarded::{migration_args, GuardedCommand};
pub use status::StatusReport;
