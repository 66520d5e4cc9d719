//! Status command implementation.
//!
//! The `dbguard status` command shows which environment the current
//! checkout resolves to and the signals that led there.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::environment::{resolve_with_signals, MatchType};
use crate::error::Result;
use crate::operation::OperationKind;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Everything `dbguard status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub config: PathBuf,
    pub environment: Option<String>,
    pub match_type: Option<MatchType>,
    pub locked: Option<bool>,
    pub project_ref: Option<String>,
    pub protected_operations: Vec<OperationKind>,
    pub linked_project_id: Option<String>,
    pub branch: Option<String>,
    pub dirty: bool,
}

/// The status command implementation.
pub struct StatusCommand<'a> {
    context: &'a CommandContext,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    pub fn new(context: &'a CommandContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Build the report without printing it.
    ///
    /// An unresolved environment is reported, not an error.
    pub fn report(&self) -> Result<StatusReport> {
        self.context.refresh_signals();
        let config = self.context.load()?;
        let signals = self.context.signals();
        let resolved = resolve_with_signals(
            self.args.env.as_deref(),
            signals.branch.as_deref(),
            signals.linked_project_id.as_deref(),
            &config.registry,
        )?;
        let env = resolved.as_ref().map(|r| &r.environment);

        Ok(StatusReport {
            environment: resolved.as_ref().map(|r| r.name.clone()),
            match_type: resolved.as_ref().map(|r| r.match_type),
            locked: env.map(|e| e.is_locked()),
            project_ref: resolved.as_ref().and_then(|r| r.project_ref.clone()),
            protected_operations: env
                .map(|e| e.protected_operations.iter().copied().collect())
                .unwrap_or_default(),
            linked_project_id: signals.linked_project_id,
            branch: signals.branch,
            dirty: self.context.is_dirty(),
            config: config.path,
        })
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(none)")
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header("dbguard status");
        ui.message(&format!("Config:       {}", report.config.display()));
        match (&report.environment, report.match_type) {
            (Some(name), Some(match_type)) => {
                ui.message(&format!("Environment:  {} ({})", name, match_type))
            }
            _ => ui.warning("Environment:  unresolved"),
        }
        if let Some(locked) = report.locked {
            ui.message(&format!(
                "Locked:       {}",
                if locked { "yes" } else { "no" }
            ));
        }
        if !report.protected_operations.is_empty() {
            let ops: Vec<_> = report
                .protected_operations
                .iter()
                .map(|op| op.as_str())
                .collect();
            ui.message(&format!("Protected:    {}", ops.join(", ")));
        }
        ui.message(&format!("Project:      {}", or_none(&report.project_ref)));
        ui.message(&format!(
            "Linked:       {}",
            or_none(&report.linked_project_id)
        ));
        ui.message(&format!("Branch:       {}", or_none(&report.branch)));
        ui.message(&format!(
            "Working tree: {}",
            if report.dirty { "dirty" } else { "clean" }
        ));
        Ok(CommandResult::success())
    }
}
