//! Runtime signals consumed by resolution and the guards.
//!
//! - [`SourceControl`] - current branch and working-tree state
//! - [`LinkedProject`] - remote project currently linked on disk
//! - [`SignalCache`] - per-invocation memoization of both

pub mod cache;
pub mod git;
pub mod linked;

pub use cache::SignalCache;
pub use git::GitCli;
pub use linked::{ProjectRefFile, PROJECT_REF_PATH};

/// Source-control queries.
pub trait SourceControl {
    /// The checked-out branch, or `None` outside a repository or on a detached HEAD.
    fn current_branch(&self) -> Option<String>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self) -> bool;
}

/// Reads the identifier of the remote project the working copy is linked to.
pub trait LinkedProject {
    fn current_linked_project_id(&self) -> Option<String>;
}
