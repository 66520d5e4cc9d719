//! Per-invocation memoization of runtime signals.

use std::path::Path;

use super::{GitCli, LinkedProject, ProjectRefFile, SourceControl};

/// Caches branch, dirty flag and linked project for one command.
///
/// Each value is queried on first access. Create a fresh cache per command,
/// or call [`SignalCache::reset`] when the underlying state changes (after
/// linking or unlinking a project).
pub struct SignalCache {
    scm: Box<dyn SourceControl>,
    linked: Box<dyn LinkedProject>,
    branch: Option<Option<String>>,
    dirty: Option<bool>,
    linked_project_id: Option<Option<String>>,
}

impl SignalCache {
    /// Cache over arbitrary providers.
    pub fn new(scm: Box<dyn SourceControl>, linked: Box<dyn LinkedProject>) -> Self {
        Self {
            scm,
            linked,
            branch: None,
            dirty: None,
            linked_project_id: None,
        }
    }

    /// Cache over git and the project-ref file of `project_root`.
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(
            Box::new(GitCli::new(project_root)),
            Box::new(ProjectRefFile::new(project_root)),
        )
    }

    pub fn current_branch(&mut self) -> Option<String> {
        let scm = &self.scm;
        self.branch.get_or_insert_with(|| scm.current_branch()).clone()
    }

    pub fn is_dirty(&mut self) -> bool {
        let scm = &self.scm;
        *self.dirty.get_or_insert_with(|| scm.is_dirty())
    }

    pub fn linked_project_id(&mut self) -> Option<String> {
        let linked = &self.linked;
        self.linked_project_id
            .get_or_insert_with(|| linked.current_linked_project_id())
            .clone()
    }

    /// Forget every cached value.
    pub fn reset(&mut self) {
        self.branch = None;
        self.dirty = None;
        self.linked_project_id = None;
    }
}
