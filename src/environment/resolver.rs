//! Environment resolution.
//!
//! Maps a runtime signal to at most one configured environment:
//!
//! - by branch: exact pattern match, then wildcard match, then the first
//!   environment without patterns (the local fallback)
//! - by linked project id: exact identifier match only
//!
//! Within each tier the first environment in declaration order wins.
//! Resolution never fails; an unmatched signal yields `None`.

use std::fmt;

use tracing::debug;

use crate::error::Result;

use super::registry::{Environment, Registry};

/// How an environment was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Named with `--env`.
    Explicit,
    /// A branch pattern or project id equal to the signal.
    Exact,
    /// A `*`/`?` branch pattern.
    Wildcard,
    /// No pattern matched; environment without patterns.
    Fallback,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "--env flag"),
            Self::Exact => write!(f, "exact match"),
            Self::Wildcard => write!(f, "wildcard match"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A resolved environment and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    /// The environment name.
    pub name: String,
    /// The environment's configuration.
    pub environment: Environment,
    /// Project identifier the target must be linked to, if any.
    pub project_ref: Option<String>,
    /// How this environment was determined.
    pub match_type: MatchType,
}

impl ResolvedEnvironment {
    fn new(env: &Environment, match_type: MatchType) -> Self {
        let project_ref = match match_type {
            MatchType::Fallback => None,
            _ => env.project_ref.clone(),
        };
        Self {
            name: env.name.clone(),
            environment: env.clone(),
            project_ref,
            match_type,
        }
    }
}

/// Resolve an environment from the current branch.
///
/// # Example
///
/// ```
/// use dbguard::environment::{resolve_by_branch, Environment, MatchType, Registry};
///
/// let registry = Registry::from_environments(vec![
///     Environment::new("preview").with_branches(&["feature/*"]),
///     Environment::new("specific").with_branches(&["feature/special"]),
/// ])
/// .unwrap();
///
/// let resolved = resolve_by_branch(Some("feature/special"), &registry).unwrap();
/// assert_eq!(resolved.name, "specific");
/// assert_eq!(resolved.match_type, MatchType::Exact);
/// ```
pub fn resolve_by_branch(branch: Option<&str>, registry: &Registry) -> Option<ResolvedEnvironment> {
    branch
        .and_then(|b| resolve_branch_patterns(b, registry))
        .or_else(|| resolve_fallback(registry))
}

/// Exact and wildcard tiers of branch resolution, without the fallback.
pub fn resolve_branch_patterns(branch: &str, registry: &Registry) -> Option<ResolvedEnvironment> {
    if let Some(env) = registry
        .iter()
        .find(|env| env.branch_patterns.iter().any(|p| p.matches_exact(branch)))
    {
        debug!("Branch '{}' exactly matches environment '{}'", branch, env.name);
        return Some(ResolvedEnvironment::new(env, MatchType::Exact));
    }

    if let Some(env) = registry
        .iter()
        .find(|env| env.branch_patterns.iter().any(|p| p.matches_wildcard(branch)))
    {
        debug!("Branch '{}' matches a pattern of environment '{}'", branch, env.name);
        return Some(ResolvedEnvironment::new(env, MatchType::Wildcard));
    }

    None
}

/// The first environment without branch patterns.
pub fn resolve_fallback(registry: &Registry) -> Option<ResolvedEnvironment> {
    registry
        .iter()
        .find(|env| env.is_fallback())
        .map(|env| ResolvedEnvironment::new(env, MatchType::Fallback))
}

/// Resolve an environment from the linked remote project identifier.
///
/// Environments without a configured identifier never match, and there is
/// no fallback.
pub fn resolve_by_project_id(id: Option<&str>, registry: &Registry) -> Option<ResolvedEnvironment> {
    let id = id?;
    registry
        .iter()
        .find(|env| env.project_ref.as_deref() == Some(id))
        .map(|env| {
            debug!("Project '{}' belongs to environment '{}'", id, env.name);
            ResolvedEnvironment::new(env, MatchType::Exact)
        })
}

/// Resolve an environment named explicitly by the user.
pub fn resolve_named(name: &str, registry: &Registry) -> Result<ResolvedEnvironment> {
    let env = registry.require(name)?;
    Ok(ResolvedEnvironment::new(env, MatchType::Explicit))
}

/// Resolve using every available signal.
///
/// Priority:
/// 1. Explicit `--env` flag
/// 2. Branch exact or wildcard match
/// 3. Linked project id
/// 4. Environment without branch patterns
///
/// Returns `Ok(None)` when nothing applies; fails only for an unknown
/// explicit name.
pub fn resolve_with_signals(
    flag: Option<&str>,
    branch: Option<&str>,
    linked_project: Option<&str>,
    registry: &Registry,
) -> Result<Option<ResolvedEnvironment>> {
    if let Some(name) = flag {
        return resolve_named(name, registry).map(Some);
    }

    let resolved = branch
        .and_then(|b| resolve_branch_patterns(b, registry))
        .or_else(|| resolve_by_project_id(linked_project, registry))
        .or_else(|| resolve_fallback(registry));

    match &resolved {
        Some(r) => debug!("Resolved environment '{}' ({})", r.name, r.match_type),
        None => debug!(
            "No environment for branch {:?} / project {:?}",
            branch, linked_project
        ),
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbGuardError;

    fn registry(envs: Vec<Environment>) -> Registry {
        Registry::from_environments(envs).unwrap()
    }

    fn standard() -> Registry {
        registry(vec![
            Environment::new("local"),
            Environment::new("preview")
                .with_branches(&["feature/*", "fix/*"])
                .with_project_ref("prev123"),
            Environment::new("staging")
                .with_branches(&["develop", "env-?"])
                .with_project_ref("stag456"),
            Environment::new("production")
                .with_branches(&["main"])
                .with_project_ref("prod789"),
        ])
    }

    #[test]
    fn exact_beats_earlier_wildcard() {
        let registry = registry(vec![
            Environment::new("preview").with_branches(&["feature/*"]),
            Environment::new("specific").with_branches(&["feature/special"]),
        ]);
        let resolved = resolve_by_branch(Some("feature/special"), &registry).unwrap();
        assert_eq!(resolved.name, "specific");
        assert_eq!(resolved.match_type, MatchType::Exact);
    }

    #[test]
    fn first_wildcard_in_declaration_order_wins() {
        let registry = registry(vec![
            Environment::new("a").with_branches(&["feat*"]),
            Environment::new("b").with_branches(&["feature/*"]),
        ]);
        let resolved = resolve_by_branch(Some("feature/x"), &registry).unwrap();
        assert_eq!(resolved.name, "a");
        assert_eq!(resolved.match_type, MatchType::Wildcard);
    }

    #[test]
    fn nested_path_matches_star() {
        let resolved = resolve_by_branch(Some("feature/auth/oauth"), &standard()).unwrap();
        assert_eq!(resolved.name, "preview");
        assert_eq!(resolved.project_ref.as_deref(), Some("prev123"));
    }

    #[test]
    fn question_mark_requires_exactly_one_character() {
        let registry = standard();
        assert_eq!(
            resolve_by_branch(Some("env-a"), &registry).unwrap().name,
            "staging"
        );
        assert_eq!(
            resolve_by_branch(Some("env-1"), &registry).unwrap().name,
            "staging"
        );
        // Too long: falls through to the local fallback.
        let resolved = resolve_by_branch(Some("env-ab"), &registry).unwrap();
        assert_eq!(resolved.name, "local");
        assert_eq!(resolved.match_type, MatchType::Fallback);
    }

    #[test]
    fn null_branch_uses_fallback() {
        let resolved = resolve_by_branch(None, &standard()).unwrap();
        assert_eq!(resolved.name, "local");
        assert_eq!(resolved.match_type, MatchType::Fallback);
        assert_eq!(resolved.project_ref, None);
    }

    #[test]
    fn fallback_drops_project_requirement() {
        let registry = registry(vec![Environment::new("local").with_project_ref("abc")]);
        let resolved = resolve_by_branch(Some("whatever"), &registry).unwrap();
        assert_eq!(resolved.match_type, MatchType::Fallback);
        assert_eq!(resolved.project_ref, None);
    }

    #[test]
    fn null_branch_without_fallback_is_unresolved() {
        let registry = registry(vec![Environment::new("production").with_branches(&["main"])]);
        assert!(resolve_by_branch(None, &registry).is_none());
        assert!(resolve_by_branch(Some("develop"), &registry).is_none());
    }

    #[test]
    fn first_fallback_wins() {
        let registry = registry(vec![Environment::new("one"), Environment::new("two")]);
        assert_eq!(resolve_by_branch(None, &registry).unwrap().name, "one");
    }

    #[test]
    fn project_id_matches_exactly() {
        let resolved = resolve_by_project_id(Some("stag456"), &standard()).unwrap();
        assert_eq!(resolved.name, "staging");
        assert_eq!(resolved.match_type, MatchType::Exact);
        assert!(resolve_by_project_id(Some("stag"), &standard()).is_none());
    }

    #[test]
    fn null_project_id_never_resolves() {
        assert!(resolve_by_project_id(None, &standard()).is_none());
    }

    #[test]
    fn environments_without_project_id_never_match() {
        let registry = registry(vec![Environment::new("local")]);
        assert!(resolve_by_project_id(Some(""), &registry).is_none());
        assert!(resolve_by_project_id(Some("local"), &registry).is_none());
    }

    #[test]
    fn explicit_flag_takes_priority() {
        let resolved =
            resolve_with_signals(Some("staging"), Some("main"), Some("prod789"), &standard())
                .unwrap()
                .unwrap();
        assert_eq!(resolved.name, "staging");
        assert_eq!(resolved.match_type, MatchType::Explicit);
    }

    #[test]
    fn explicit_unknown_name_fails() {
        let err = resolve_with_signals(Some("prod"), None, None, &standard()).unwrap_err();
        assert!(matches!(err, DbGuardError::EnvironmentUnknown { .. }));
    }

    #[test]
    fn branch_match_beats_linked_project() {
        let resolved = resolve_with_signals(None, Some("main"), Some("stag456"), &standard())
            .unwrap()
            .unwrap();
        assert_eq!(resolved.name, "production");
    }

    #[test]
    fn linked_project_beats_fallback() {
        let resolved =
            resolve_with_signals(None, Some("random-branch"), Some("stag456"), &standard())
                .unwrap()
                .unwrap();
        assert_eq!(resolved.name, "staging");
    }

    #[test]
    fn nothing_matches() {
        let registry = registry(vec![Environment::new("production").with_branches(&["main"])]);
        let resolved = resolve_with_signals(None, Some("develop"), None, &registry).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn match_type_display() {
        assert_eq!(MatchType::Wildcard.to_string(), "wildcard match");
        assert_eq!(MatchType::Explicit.to_string(), "--env flag");
    }
}
