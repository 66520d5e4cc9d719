//! The ordered set of configured environments.
//!
//! Declaration order is significant: when two environments match a signal
//! equally well, the one declared first wins. The registry is therefore a
//! `Vec`, never a hash map.

use std::collections::BTreeSet;

use crate::error::{DbGuardError, Result};
use crate::operation::OperationKind;

use super::pattern::BranchPattern;

/// Environment name that is locked unless configured otherwise.
pub const PRODUCTION_NAME: &str = "production";

/// Branch names that mark an environment as production-like.
const PRODUCTION_BRANCHES: [&str; 2] = ["main", "master"];

/// A named deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Unique name (the config table key).
    pub name: String,
    /// Remote project identifier this environment deploys to.
    pub project_ref: Option<String>,
    /// Branch patterns, checked in order.
    pub branch_patterns: Vec<BranchPattern>,
    /// Operations that need typed or yes/no confirmation.
    pub protected_operations: BTreeSet<OperationKind>,
    /// Overrides the confirmation phrase (defaults to `name`).
    pub confirm_word: Option<String>,
    /// Explicit lock state. `None` derives the default from name and branches.
    pub locked: Option<bool>,
}

impl Environment {
    /// Create an environment with no patterns, identifier or protection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_ref: None,
            branch_patterns: Vec::new(),
            protected_operations: BTreeSet::new(),
            confirm_word: None,
            locked: None,
        }
    }

    /// Set the branch patterns.
    pub fn with_branches(mut self, patterns: &[&str]) -> Self {
        self.branch_patterns = patterns.iter().map(|p| BranchPattern::new(p)).collect();
        self
    }

    /// Set the remote project identifier.
    pub fn with_project_ref(mut self, project_ref: impl Into<String>) -> Self {
        self.project_ref = Some(project_ref.into());
        self
    }

    /// Set the protected operations.
    pub fn with_protected(mut self, ops: &[OperationKind]) -> Self {
        self.protected_operations = ops.iter().copied().collect();
        self
    }

    /// Set the confirmation phrase.
    pub fn with_confirm_word(mut self, word: impl Into<String>) -> Self {
        self.confirm_word = Some(word.into());
        self
    }

    /// Set the explicit lock state.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Effective lock state.
    ///
    /// Without an explicit value, an environment named `production` or one
    /// that tracks `main`/`master` is locked.
    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or_else(|| self.looks_like_production())
    }

    /// Whether the lock state comes from the derived default.
    pub fn is_lock_derived(&self) -> bool {
        self.locked.is_none()
    }

    fn looks_like_production(&self) -> bool {
        self.name == PRODUCTION_NAME
            || self
                .branch_patterns
                .iter()
                .any(|p| PRODUCTION_BRANCHES.contains(&p.as_str()))
    }

    /// The phrase a user must type to confirm.
    pub fn confirm_word(&self) -> &str {
        self.confirm_word.as_deref().unwrap_or(&self.name)
    }

    /// Whether `op` requires confirmation here.
    pub fn is_protected(&self, op: OperationKind) -> bool {
        self.protected_operations.contains(&op)
    }

    /// Environments without branch patterns act as the local fallback.
    pub fn is_fallback(&self) -> bool {
        self.branch_patterns.is_empty()
    }
}

/// Ordered mapping from environment name to [`Environment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    environments: Vec<Environment>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate names.
    pub fn from_environments(environments: Vec<Environment>) -> Result<Self> {
        let mut registry = Self::new();
        for env in environments {
            registry.insert(env)?;
        }
        Ok(registry)
    }

    /// Append an environment, keeping declaration order.
    pub fn insert(&mut self, env: Environment) -> Result<()> {
        if self.get(&env.name).is_some() {
            return Err(DbGuardError::ConfigValidationError {
                message: format!("environment '{}' is defined more than once", env.name),
            });
        }
        self.environments.push(env);
        Ok(())
    }

    /// Look up an environment by name.
    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Look up an environment, or fail with the list of valid names.
    pub fn require(&self, name: &str) -> Result<&Environment> {
        self.get(name).ok_or_else(|| DbGuardError::EnvironmentUnknown {
            name: name.to_string(),
            available: self.names().map(String::from).collect(),
        })
    }

    /// Environment names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|e| e.name.as_str())
    }

    /// Iterate environments in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Environment> {
        self.environments.iter()
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Whether no environment is configured.
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Set the explicit lock state of `name`.
    ///
    /// This only changes the in-memory registry; callers persist it.
    pub fn set_locked(&mut self, name: &str, locked: bool) -> Result<()> {
        let available: Vec<String> = self.names().map(String::from).collect();
        match self.environments.iter_mut().find(|e| e.name == name) {
            Some(env) => {
                env.locked = Some(locked);
                Ok(())
            }
            None => Err(DbGuardError::EnvironmentUnknown {
                name: name.to_string(),
                available,
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Environment;
    type IntoIter = std::slice::Iter<'a, Environment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
