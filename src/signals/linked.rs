//! Linked-project state file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::LinkedProject;

/// Where the migration CLI records the linked project, relative to the project root.
pub const PROJECT_REF_PATH: &str = "supabase/.temp/project-ref";

/// Reads the linked project id from [`PROJECT_REF_PATH`].
#[derive(Debug, Clone)]
pub struct ProjectRefFile {
    path: PathBuf,
}

impl ProjectRefFile {
    pub fn new(project_root: &Path) -> Self {
        Self {
            path: project_root.join(PROJECT_REF_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LinkedProject for ProjectRefFile {
    fn current_linked_project_id(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| debug!("No linked project at {}: {}", self.path.display(), e))
            .ok()?;
        let id = content.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}
