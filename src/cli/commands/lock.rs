//! Lock and unlock commands.
//!
//! `dbguard lock [ENV]` and `dbguard unlock [ENV]` write an explicit
//! `locked` value to dbguard.toml. Without `ENV` the resolved environment
//! is used.

use tracing::info;

use crate::cli::args::LockArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Sets the lock state of one environment.
pub struct LockCommand<'a> {
    context: &'a CommandContext,
    args: LockArgs,
    locked: bool,
}

impl<'a> LockCommand<'a> {
    /// `dbguard lock`.
    pub fn lock(context: &'a CommandContext, args: LockArgs) -> Self {
        Self {
            context,
            args,
            locked: true,
        }
    }

    /// `dbguard unlock`.
    pub fn unlock(context: &'a CommandContext, args: LockArgs) -> Self {
        Self {
            context,
            args,
            locked: false,
        }
    }

    fn verb(&self) -> &'static str {
        if self.locked {
            "locked"
        } else {
            "unlocked"
        }
    }
}

impl Command for LockCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.context.refresh_signals();
        let mut config = self.context.load()?;
        let name = match &self.args.env {
            Some(name) => config.registry.require(name)?.name.clone(),
            None => self.context.resolve(&config, None, ui)?.name,
        };

        let env = config.registry.require(&name)?;
        if env.locked == Some(self.locked) {
            ui.message(&format!("'{}' is already {}", name, self.verb()));
            return Ok(CommandResult::success());
        }
        let was_derived = env.is_lock_derived();

        config.registry.set_locked(&name, self.locked)?;
        self.context.config().set_locked(&name, self.locked)?;

        let now_locked = config.registry.require(&name)?.is_locked();
        let state = if now_locked { "locked" } else { "unlocked" };
        info!("Environment '{}' {}", name, state);
        ui.success(&format!("'{}' is now {}", name, state));
        if !now_locked && was_derived {
            ui.show_hint(&format!(
                "'{}' stays unlocked until `dbguard lock {}`",
                name, name
            ));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::testing::Fixture;
    use crate::error::DbGuardError;
    use crate::ui::MockUI;

    const CONFIG: &str = r#"
[environments.staging]
git_branches = ["develop"]

[environments.production]
git_branches = ["main"]
"#;

    fn env_args(name: &str) -> LockArgs {
        LockArgs {
            env: Some(name.to_string()),
        }
    }

    #[test]
    fn lock_named_environment() {
        let built = Fixture::new(CONFIG).build();
        let mut ui = MockUI::new();
        LockCommand::lock(&built.context, env_args("staging"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(*built.locks.borrow(), vec![("staging".to_string(), true)]);
        assert!(ui.has_success("'staging' is now locked"));
    }

    #[test]
    fn unlock_derived_production_writes_explicit_value() {
        let built = Fixture::new(CONFIG).build();
        let mut ui = MockUI::new();
        LockCommand::unlock(&built.context, env_args("production"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(*built.locks.borrow(), vec![("production".to_string(), false)]);
        assert!(ui.has_success("'production' is now unlocked"));
        assert!(ui.has_hint("dbguard lock production"));
    }

    #[test]
    fn defaults_to_resolved_environment() {
        let built = Fixture::new(CONFIG).branch("develop").build();
        let mut ui = MockUI::new();
        LockCommand::lock(&built.context, LockArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(*built.locks.borrow(), vec![("staging".to_string(), true)]);
    }

    #[test]
    fn already_in_state_is_a_no_op() {
        let config = CONFIG.replace("git_branches = [\"develop\"]", "git_branches = [\"develop\"]\nlocked = true");
        let built = Fixture::new(&config).build();
        let mut ui = MockUI::new();
        LockCommand::lock(&built.context, env_args("staging"))
            .execute(&mut ui)
            .unwrap();
        assert!(built.locks.borrow().is_empty());
        assert!(ui.has_message("already locked"));
    }

    #[test]
    fn unknown_environment_fails() {
        let built = Fixture::new(CONFIG).build();
        let mut ui = MockUI::new();
        assert!(matches!(
            LockCommand::lock(&built.context, env_args("qa")).execute(&mut ui),
            Err(DbGuardError::EnvironmentUnknown { .. })
        ));
        assert!(built.locks.borrow().is_empty());
    }
}
