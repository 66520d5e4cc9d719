//! Lock guard: locked environments refuse every destructive operation.

use crate::operation::RiskLevel;

use super::chain::Guard;
use super::context::GuardContext;
use super::result::GuardResult;

/// Blocks destructive operations on locked environments.
#[derive(Debug, Default)]
pub struct LockGuard;

impl Guard for LockGuard {
    fn name(&self) -> &'static str {
        "lock"
    }

    fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        let env = ctx.environment();
        if ctx.operation.is_read_only() || !env.is_locked() {
            return GuardResult::allow();
        }

        let why = if env.is_lock_derived() {
            " (production environments are locked unless configured otherwise)"
        } else {
            ""
        };

        GuardResult::block(
            format!(
                "Environment '{}' is locked; '{}' is not allowed{}",
                env.name, ctx.operation, why
            ),
            RiskLevel::Critical,
        )
        .with_suggestion(format!(
            "Run `dbguard unlock {}` if this {} is intended",
            env.name, ctx.operation
        ))
        .with_suggestion("Target another environment with `--env <name>`")
        .with_suggestion(format!(
            "Set `locked = false` under [environments.{}] in dbguard.toml",
            env.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{resolve_named, Environment, Registry};
    use crate::operation::OperationKind;

    fn check(env: Environment, op: OperationKind) -> GuardResult {
        let name = env.name.clone();
        let registry = Registry::from_environments(vec![env]).unwrap();
        let resolved = resolve_named(&name, &registry).unwrap();
        LockGuard.check(&GuardContext::new(op, &resolved, &registry))
    }

    #[test]
    fn locked_environment_blocks_every_destructive_operation() {
        for op in OperationKind::ALL {
            if op.is_read_only() {
                continue;
            }
            let result = check(Environment::new("production").with_locked(true), op);
            assert!(result.is_blocked(), "{} should be blocked", op);
            assert_eq!(result.risk_level, Some(RiskLevel::Critical));
            assert!(!result.suggestions.is_empty());
        }
    }

    #[test]
    fn pull_on_locked_production_is_blocked() {
        let result = check(
            Environment::new("production").with_locked(true),
            OperationKind::Pull,
        );
        assert!(result.is_blocked());
        assert!(result.reason.unwrap().contains("locked"));
    }

    #[test]
    fn diff_is_always_allowed() {
        let result = check(
            Environment::new("production").with_locked(true),
            OperationKind::Diff,
        );
        assert!(result.allowed);
    }

    #[test]
    fn derived_lock_blocks_and_explains() {
        let result = check(
            Environment::new("live").with_branches(&["master"]),
            OperationKind::Push,
        );
        assert!(result.is_blocked());
        assert!(result.reason.unwrap().contains("unless configured otherwise"));
    }

    #[test]
    fn explicitly_unlocked_production_is_allowed() {
        let result = check(
            Environment::new("production").with_locked(false),
            OperationKind::Reset,
        );
        assert!(result.allowed);
    }

    #[test]
    fn unlocked_environment_is_allowed() {
        let result = check(Environment::new("staging"), OperationKind::Reset);
        assert!(result.allowed);
        assert!(result.suggestions.is_empty());
    }
}
