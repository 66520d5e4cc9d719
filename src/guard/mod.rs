//! Safety guards evaluated before a destructive operation.
//!
//! Four guards run in a fixed order against a shared [`GuardContext`]:
//!
//! 1. [`LockGuard`] - locked environments refuse destructive operations
//! 2. [`OperationGuard`] - attaches risk, requests confirmation for protected operations
//! 3. [`ProjectGuard`] - the linked project must match the environment
//! 4. [`WorkingTreeGuard`] - optional clean-tree enforcement
//!
//! The first block ends evaluation. When every guard allows, the results
//! are combined with [`GuardResult::combine`].

pub mod chain;
pub mod context;
pub mod lock;
pub mod project;
pub mod protection;
pub mod result;
pub mod worktree;

pub use chain::{Guard, GuardChain};
pub use context::GuardContext;
pub use lock::LockGuard;
pub use project::ProjectGuard;
pub use protection::OperationGuard;
pub use result::GuardResult;
pub use worktree::WorkingTreeGuard;
