//! Environment listing.
//!
//! The `dbguard envs` command lists configured environments in
//! declaration order.

use crate::environment::Environment;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The envs command implementation.
pub struct EnvsCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> EnvsCommand<'a> {
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

/// One-line summary of an environment.
pub fn describe(env: &Environment) -> String {
    let mut parts = Vec::new();
    if env.is_fallback() {
        parts.push("fallback".to_string());
    } else {
        let patterns: Vec<_> = env.branch_patterns.iter().map(|p| p.as_str()).collect();
        parts.push(format!("branches: {}", patterns.join(", ")));
    }
    if let Some(id) = &env.project_ref {
        parts.push(format!("project: {}", id));
    }
    if !env.protected_operations.is_empty() {
        let ops: Vec<_> = env.protected_operations.iter().map(|op| op.as_str()).collect();
        parts.push(format!("protected: {}", ops.join(", ")));
    }
    if env.is_locked() {
        parts.push("locked".to_string());
    }
    format!("{}  {}", env.name, parts.join(" | "))
}

impl Command for EnvsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load()?;
        if config.registry.is_empty() {
            ui.warning(&format!("No environments in {}", config.path.display()));
            return Ok(CommandResult::success());
        }

        ui.show_header("Environments");
        for env in &config.registry {
            ui.message(&describe(env));
        }
        Ok(CommandResult::success())
    }
}
