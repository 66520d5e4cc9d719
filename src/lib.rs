//! dbguard - Safety guard for database migration CLIs.
//!
//! dbguard sits in front of a migration CLI (Supabase by default) and
//! decides, per invocation, whether an operation may run against the
//! environment the current checkout points at.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `dbguard.toml` loading and lock persistence
//! - [`confirm`] - Confirmation protocol
//! - [`environment`] - Environment registry and resolution
//! - [`error`] - Error types and result aliases
//! - [`guard`] - Guard chain and guard results
//! - [`operation`] - Operation kinds and risk levels
//! - [`shell`] - Migration CLI execution and CI detection
//! - [`signals`] - Git branch, dirty flag and linked project
//! - [`ui`] - Interactive prompts and terminal output
//!
//! # Example
//!
//! ```
//! use dbguard::environment::{resolve_with_signals, Environment, Registry};
//! use dbguard::guard::{GuardChain, GuardContext};
//! use dbguard::operation::OperationKind;
//!
//! let registry = Registry::from_environments(vec![
//!     Environment::new("local"),
//!     Environment::new("production").with_branches(&["main"]),
//! ])
//! .unwrap();
//!
//! let resolved = resolve_with_signals(None, Some("main"), None, &registry)
//!     .unwrap()
//!     .unwrap();
//! let ctx = GuardContext::new(OperationKind::Reset, &resolved, &registry);
//! let decision = GuardChain::standard().evaluate(&ctx);
//! assert!(decision.is_blocked());
//! ```

pub mod cli;
pub mod config;
pub mod confirm;
pub mod environment;
pub mod error;
pub mod guard;
pub mod operation;
pub mod shell;
pub mod signals;
pub mod ui;

pub use error::{DbGuardError, Result};
