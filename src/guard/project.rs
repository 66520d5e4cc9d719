//! Project-identity guard: the linked remote project must be the one the
//! environment is configured for.

use crate::operation::RiskLevel;

use super::chain::Guard;
use super::context::GuardContext;
use super::result::GuardResult;

/// Blocks when a different project is linked than the environment expects.
#[derive(Debug, Default)]
pub struct ProjectGuard;

impl Guard for ProjectGuard {
    fn name(&self) -> &'static str {
        "project"
    }

    fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        let name = ctx.environment_name();
        let Some(expected) = ctx.resolved.project_ref.as_deref() else {
            return GuardResult::allow().with_suggestion(format!(
                "Set `project_ref` under [environments.{}] to verify the linked project",
                name
            ));
        };

        match ctx.linked_project_id {
            None => GuardResult::allow().with_suggestion(format!(
                "No project is linked; run `dbguard link --env {}`",
                name
            )),
            Some(actual) if actual == expected => GuardResult::allow(),
            Some(actual) => GuardResult::block(
                format!(
                    "Linked project '{}' does not match '{}' expected by environment '{}'",
                    actual, expected, name
                ),
                RiskLevel::High,
            )
            .with_suggestion(format!("Re-link with `dbguard link --env {}`", name))
            .with_suggestion("Check out the branch that belongs to the linked project"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{resolve_named, Environment, Registry};
    use crate::operation::OperationKind;

    fn check(env: Environment, linked: Option<&str>) -> GuardResult {
        let name = env.name.clone();
        let registry = Registry::from_environments(vec![env]).unwrap();
        let resolved = resolve_named(&name, &registry).unwrap();
        let ctx = GuardContext::new(OperationKind::Push, &resolved, &registry)
            .with_linked_project(linked);
        ProjectGuard.check(&ctx)
    }

    #[test]
    fn mismatch_blocks_and_names_both_ids() {
        let result = check(
            Environment::new("staging").with_project_ref("expected1"),
            Some("actual99"),
        );
        assert!(result.is_blocked());
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        let reason = result.reason.unwrap();
        assert!(reason.contains("actual99"));
        assert!(reason.contains("expected1"));
        assert!(result.suggestions.iter().any(|s| s.contains("link")));
    }

    #[test]
    fn match_allows_without_suggestions() {
        let result = check(
            Environment::new("staging").with_project_ref("abc"),
            Some("abc"),
        );
        assert!(result.allowed);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn nothing_linked_allows_with_advice() {
        let result = check(Environment::new("staging").with_project_ref("abc"), None);
        assert!(result.allowed);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn unconfigured_environment_allows_with_advice() {
        let result = check(Environment::new("staging"), Some("whatever"));
        assert!(result.allowed);
        assert!(result.suggestions[0].contains("project_ref"));

        let result = check(Environment::new("staging"), None);
        assert!(result.allowed);
    }
}
