//! Ordered guard evaluation.

use tracing::debug;

use super::context::GuardContext;
use super::lock::LockGuard;
use super::project::ProjectGuard;
use super::protection::OperationGuard;
use super::result::GuardResult;
use super::worktree::WorkingTreeGuard;
use crate::operation::OperationKind;

/// An independent safety check.
pub trait Guard {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Evaluate the guard. Guards are pure: they only read the context.
    fn check(&self, ctx: &GuardContext<'_>) -> GuardResult;
}

/// Guards evaluated in a fixed order.
///
/// The first guard that blocks ends the evaluation; later guards do not run.
pub struct GuardChain {
    guards: Vec<Box<dyn Guard>>,
}

impl GuardChain {
    /// The standard chain: lock, operation, project identity, working tree.
    pub fn standard() -> Self {
        Self::with_guards(vec![
            Box::new(LockGuard),
            Box::new(OperationGuard),
            Box::new(ProjectGuard),
            Box::new(WorkingTreeGuard),
        ])
    }

    /// The chain for one operation.
    ///
    /// `link` replaces whatever project is linked, so it skips the
    /// project-identity check.
    pub fn for_operation(operation: OperationKind) -> Self {
        if operation == OperationKind::Link {
            Self::with_guards(vec![
                Box::new(LockGuard),
                Box::new(OperationGuard),
                Box::new(WorkingTreeGuard),
            ])
        } else {
            Self::standard()
        }
    }

    /// A chain of custom guards, evaluated in the given order.
    pub fn with_guards(guards: Vec<Box<dyn Guard>>) -> Self {
        Self { guards }
    }

    /// Guard names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.guards.iter().map(|g| g.name()).collect()
    }

    /// Evaluate the chain against `ctx`.
    pub fn evaluate(&self, ctx: &GuardContext<'_>) -> GuardResult {
        let mut results = Vec::with_capacity(self.guards.len());
        for guard in &self.guards {
            let result = guard.check(ctx);
            if result.is_blocked() {
                debug!(
                    "Guard '{}' blocked {} on '{}'",
                    guard.name(),
                    ctx.operation,
                    ctx.environment_name()
                );
                return result;
            }
            debug!("Guard '{}' allowed {}", guard.name(), ctx.operation);
            results.push(result);
        }
        GuardResult::combine(&results)
    }
}

impl Default for GuardChain {
    fn default() -> Self {
        Self::standard()
    }
}
