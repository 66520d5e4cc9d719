//! Per-invocation guard context.

use crate::environment::{Environment, Registry, ResolvedEnvironment};
use crate::operation::OperationKind;

/// Everything a guard may look at.
///
/// Built once per command from the resolved environment and the runtime
/// signals, and never mutated while the chain runs.
#[derive(Debug, Clone)]
pub struct GuardContext<'a> {
    /// The operation about to run.
    pub operation: OperationKind,
    /// The target environment.
    pub resolved: &'a ResolvedEnvironment,
    /// The full registry.
    pub registry: &'a Registry,
    /// Current branch, if known.
    pub branch: Option<&'a str>,
    /// Project id currently linked on disk.
    pub linked_project_id: Option<&'a str>,
    /// Non-interactive (CI) mode.
    pub ci: bool,
    /// Uncommitted changes in the working tree.
    pub dirty: bool,
    /// `require_clean_git` setting.
    pub enforce_clean_tree: bool,
}

impl<'a> GuardContext<'a> {
    /// Create a context with no runtime signals.
    pub fn new(
        operation: OperationKind,
        resolved: &'a ResolvedEnvironment,
        registry: &'a Registry,
    ) -> Self {
        Self {
            operation,
            resolved,
            registry,
            branch: None,
            linked_project_id: None,
            ci: false,
            dirty: false,
            enforce_clean_tree: false,
        }
    }

    /// Set the current branch.
    pub fn with_branch(mut self, branch: Option<&'a str>) -> Self {
        self.branch = branch;
        self
    }

    /// Set the linked project id.
    pub fn with_linked_project(mut self, id: Option<&'a str>) -> Self {
        self.linked_project_id = id;
        self
    }

    /// Set CI mode.
    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Set whether the working tree has uncommitted changes.
    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    /// Set whether a clean working tree is required.
    pub fn with_clean_tree_enforced(mut self, enforce: bool) -> Self {
        self.enforce_clean_tree = enforce;
        self
    }

    /// Name of the target environment.
    pub fn environment_name(&self) -> &str {
        &self.resolved.name
    }

    /// Configuration of the target environment.
    pub fn environment(&self) -> &Environment {
        &self.resolved.environment
    }
}
