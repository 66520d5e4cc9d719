//! Guarded operations.
//!
//! `dbguard push|reset|seed|migrate|pull|diff|link|unlink` resolve the
//! target environment, run the guard chain, confirm when required and only
//! then hand over to the migration CLI.

use tracing::{debug, info, warn};

use crate::cli::args::GuardedArgs;
use crate::confirm::{ConfirmationProtocol, ConfirmationState};
use crate::environment::ResolvedEnvironment;
use crate::error::{DbGuardError, Result};
use crate::guard::{GuardChain, GuardContext, GuardResult};
use crate::operation::OperationKind;
use crate::shell::MigrationCli;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Migration CLI arguments for an operation on an environment.
///
/// `--linked` is added only when the resolved environment carries a project
/// requirement, which the project-identity guard has checked. A fallback
/// match has none and runs locally. `extra` is appended unchanged.
pub fn migration_args(
    operation: OperationKind,
    resolved: &ResolvedEnvironment,
    extra: &[String],
) -> Result<Vec<String>> {
    let mut args: Vec<String> = match operation {
        OperationKind::Push => vec!["db".into(), "push".into()],
        OperationKind::Reset => vec!["db".into(), "reset".into()],
        OperationKind::Seed => vec!["db".into(), "seed".into()],
        OperationKind::Migrate => vec!["migration".into(), "up".into()],
        OperationKind::Pull => vec!["db".into(), "pull".into()],
        OperationKind::Diff => vec!["db".into(), "diff".into()],
        OperationKind::Unlink => vec!["unlink".into()],
        OperationKind::Link => {
            let id = resolved.environment.project_ref.as_deref().ok_or_else(|| DbGuardError::ConfigValidationError {
                message: format!(
                    "environment '{}' has no project_ref to link to",
                    resolved.name
                ),
            })?;
            vec!["link".into(), "--project-ref".into(), id.to_string()]
        }
    };

    if resolved.project_ref.is_some()
        && !matches!(operation, OperationKind::Link | OperationKind::Unlink)
    {
        args.push("--linked".into());
    }
    args.extend(extra.iter().cloned());
    Ok(args)
}

/// A guarded operation.
pub struct GuardedCommand<'a> {
    context: &'a CommandContext,
    operation: OperationKind,
    args: GuardedArgs,
}

impl<'a> GuardedCommand<'a> {
    pub fn new(context: &'a CommandContext, operation: OperationKind, args: GuardedArgs) -> Self {
        Self {
            context,
            operation,
            args,
        }
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    fn show_plan(
        &self,
        resolved: &ResolvedEnvironment,
        decision: &GuardResult,
        ui: &mut dyn UserInterface,
    ) {
        ui.message(&format!(
            "{} → '{}' ({}, {} risk)",
            self.operation,
            resolved.name,
            resolved.match_type,
            decision.risk()
        ));
        for suggestion in &decision.suggestions {
            ui.show_hint(suggestion);
        }
    }

    fn dry_run(
        &self,
        cli: &dyn MigrationCli,
        args: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut preview = args.to_vec();
        preview.push("--dry-run".into());
        ui.show_header("Pending changes");
        let output = cli.run(&preview)?;
        if !output.success() {
            return Err(DbGuardError::CommandFailed {
                command: format!("{} {}", cli.program(), preview.join(" ")),
                code: output.exit_code,
            });
        }
        Ok(())
    }

    fn confirm(
        &self,
        decision: &GuardResult,
        resolved: &ResolvedEnvironment,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if !decision.requires_confirmation {
            return Ok(());
        }
        if self.context.assume_yes() {
            warn!(
                "Confirmation for {} on '{}' skipped by --yes",
                self.operation, resolved.name
            );
            ui.warning("Confirmation skipped (--yes)");
            return Ok(());
        }

        let non_interactive = self.context.ci() || !ui.is_interactive();
        let state = ConfirmationProtocol::new(non_interactive).run(
            decision,
            &resolved.name,
            self.operation,
            ui,
        )?;
        match state {
            ConfirmationState::Declined => {
                if non_interactive {
                    ui.show_hint("Pass --yes to confirm in non-interactive mode");
                }
                Err(DbGuardError::ConfirmationDeclined)
            }
            ConfirmationState::Cancelled => Err(DbGuardError::ConfirmationCancelled),
            _ => Ok(()),
        }
    }
}

impl Command for GuardedCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.context.refresh_signals();
        let config = self.context.load()?;
        let resolved = self
            .context
            .resolve(&config, self.args.env.as_deref(), ui)?;

        let signals = self.context.signals();
        let enforce_clean = config.settings.require_clean_git;
        let dirty = enforce_clean && self.operation.is_destructive() && self.context.is_dirty();

        let ctx = GuardContext::new(self.operation, &resolved, &config.registry)
            .with_branch(signals.branch.as_deref())
            .with_linked_project(signals.linked_project_id.as_deref())
            .with_ci(self.context.ci())
            .with_dirty(dirty)
            .with_clean_tree_enforced(enforce_clean);
        let chain = GuardChain::for_operation(self.operation);
        if ui.output_mode().shows_details() {
            ui.message(&format!("Guards: {}", chain.names().join(" → ")));
        }
        let decision = chain.evaluate(&ctx);

        if decision.is_blocked() {
            info!("{} on '{}' blocked", self.operation, resolved.name);
            return Err(DbGuardError::GuardBlocked {
                environment: resolved.name.clone(),
                reason: decision.reason.unwrap_or_default(),
                suggestions: decision.suggestions,
            });
        }
        self.show_plan(&resolved, &decision, ui);

        let cli = self.context.migration_cli(&config.settings);
        let args = migration_args(self.operation, &resolved, &self.args.passthrough)?;

        if config.settings.show_diff && self.operation == OperationKind::Push {
            self.dry_run(cli.as_ref(), &args, ui)?;
        }

        self.confirm(&decision, &resolved, ui)?;

        debug!("Executing {} {:?}", cli.program(), args);
        let output = cli.run(&args)?;
        if matches!(self.operation, OperationKind::Link | OperationKind::Unlink) {
            self.context.refresh_signals();
        }
        if !output.success() {
            return Err(DbGuardError::CommandFailed {
                command: format!("{} {}", cli.program(), args.join(" ")),
                code: output.exit_code,
            });
        }

        ui.success(&format!("{} on '{}' completed", self.operation, resolved.name));
        Ok(CommandResult::success())
    }
}
