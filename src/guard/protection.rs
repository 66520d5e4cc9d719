//! Operation guard: attaches the operation's risk and asks for confirmation
//! on protected operations.

use super::chain::Guard;
use super::context::GuardContext;
use super::result::GuardResult;

/// Never blocks; marks protected operations as needing confirmation.
#[derive(Debug, Default)]
pub struct OperationGuard;

impl Guard for OperationGuard {
    fn name(&self) -> &'static str {
        "operation"
    }

    fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        let env = ctx.environment();
        let result = GuardResult::allow().with_risk(ctx.operation.risk_level());
        if env.is_protected(ctx.operation) {
            result.with_confirmation(env.confirm_word())
        } else {
            result
        }
    }
}
