//! Working-tree guard: optionally refuse destructive operations with
//! uncommitted changes.

use crate::operation::RiskLevel;

use super::chain::Guard;
use super::context::GuardContext;
use super::result::GuardResult;

/// Blocks destructive operations on a dirty tree when `require_clean_git` is set.
#[derive(Debug, Default)]
pub struct WorkingTreeGuard;

impl Guard for WorkingTreeGuard {
    fn name(&self) -> &'static str {
        "working-tree"
    }

    fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        if !ctx.enforce_clean_tree || !ctx.operation.is_destructive() || !ctx.dirty {
            return GuardResult::allow();
        }

        GuardResult::block(
            format!(
                "Working tree has uncommitted changes; commit them before '{}'",
                ctx.operation
            ),
            RiskLevel::Medium,
        )
        .with_suggestion("Stash your changes with `git stash`")
        .with_suggestion("Commit your changes with `git commit`")
        .with_suggestion("Set `require_clean_git = false` under [settings] in dbguard.toml")
    }
}
