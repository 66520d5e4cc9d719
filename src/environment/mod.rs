//! Environment registry and resolution.
//!
//! Determines which configured environment a command targets. The
//! priority chain is:
//!
//! 1. Explicit `--env` flag
//! 2. Current branch (exact pattern, then wildcard pattern)
//! 3. Linked remote project identifier
//! 4. Environment without branch patterns (local fallback)

pub mod pattern;
pub mod registry;
pub mod resolver;

pub use pattern::BranchPattern;
pub use registry::{Environment, Registry, PRODUCTION_NAME};
pub use resolver::{
    resolve_branch_patterns, resolve_by_branch, resolve_by_project_id, resolve_fallback,
    resolve_named, resolve_with_signals, MatchType, ResolvedEnvironment,
};
