//! Integration tests for the resolve → guard → confirm pipeline.

use dbguard::config::parse_config;
use dbguard::confirm::{ConfirmationProtocol, ConfirmationState, CONFIRM_WORD_KEY};
use dbguard::environment::{resolve_with_signals, MatchType, ResolvedEnvironment};
use dbguard::guard::{GuardChain, GuardContext, GuardResult};
use dbguard::operation::{OperationKind, RiskLevel};
use dbguard::ui::MockUI;
use std::path::Path;

const CONFIG: &str = r#"
[environments.local]

[environments.preview]
git_branches = ["feature/*"]

[environments.staging]
project_ref = "stag456"
git_branches = ["develop", "release/v?"]
protected_operations = ["reset"]

[environments.production]
project_ref = "prod789"
git_branches = ["main"]
protected_operations = ["push", "reset"]
confirm_word = "ship-it"
locked = false
"#;

struct Pipeline {
    config: dbguard::config::LoadedConfig,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            config: parse_config(CONFIG, Path::new("dbguard.toml")).unwrap(),
        }
    }

    fn resolve(&self, branch: Option<&str>, linked: Option<&str>) -> Option<ResolvedEnvironment> {
        resolve_with_signals(None, branch, linked, &self.config.registry).unwrap()
    }

    fn decide(
        &self,
        op: OperationKind,
        resolved: &ResolvedEnvironment,
        linked: Option<&str>,
    ) -> GuardResult {
        let ctx = GuardContext::new(op, resolved, &self.config.registry)
            .with_linked_project(linked);
        GuardChain::standard().evaluate(&ctx)
    }
}

#[test]
fn feature_branch_resolves_by_wildcard() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(Some("feature/auth/login"), None).unwrap();
    assert_eq!(resolved.name, "preview");
    assert_eq!(resolved.match_type, MatchType::Wildcard);
}

#[test]
fn question_mark_pattern_needs_one_character() {
    let pipeline = Pipeline::new();
    assert_eq!(pipeline.resolve(Some("release/v2"), None).unwrap().name, "staging");
    assert_eq!(
        pipeline.resolve(Some("release/v10"), None).unwrap().match_type,
        MatchType::Fallback
    );
}

#[test]
fn unlocked_production_push_needs_confirm_word() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(Some("main"), Some("prod789")).unwrap();
    let decision = pipeline.decide(OperationKind::Push, &resolved, Some("prod789"));
    assert!(decision.allowed);
    assert!(decision.requires_confirmation);
    assert_eq!(decision.confirm_word.as_deref(), Some("ship-it"));
    assert_eq!(decision.risk(), RiskLevel::Medium);

    let mut ui = MockUI::new();
    ui.set_prompt_response(CONFIRM_WORD_KEY, " ship-it ");
    let state = ConfirmationProtocol::new(false)
        .run(&decision, &resolved.name, OperationKind::Push, &mut ui)
        .unwrap();
    assert_eq!(state, ConfirmationState::Confirmed);
}

#[test]
fn production_reset_with_wrong_link_is_blocked() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(Some("main"), Some("stag456")).unwrap();
    let decision = pipeline.decide(OperationKind::Reset, &resolved, Some("stag456"));
    assert!(decision.is_blocked());
    assert_eq!(decision.risk(), RiskLevel::High);
    assert!(decision.reason.unwrap().contains("stag456"));
}

#[test]
fn fallback_environment_is_not_checked_against_linked_project() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(None, Some("unknown")).unwrap();
    assert_eq!(resolved.name, "local");
    assert_eq!(resolved.project_ref, None);
    let decision = pipeline.decide(OperationKind::Reset, &resolved, Some("unknown"));
    assert!(decision.allowed);
    assert!(!decision.requires_confirmation);
    assert_eq!(decision.risk(), RiskLevel::Critical);
}

#[test]
fn linked_project_resolves_when_branch_is_unknown() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(Some("hotfix/1"), Some("stag456")).unwrap();
    assert_eq!(resolved.name, "staging");
    assert_eq!(resolved.match_type, MatchType::Exact);
}

#[test]
fn ci_declines_what_a_user_would_confirm() {
    let pipeline = Pipeline::new();
    let resolved = pipeline.resolve(Some("develop"), Some("stag456")).unwrap();
    let decision = pipeline.decide(OperationKind::Reset, &resolved, Some("stag456"));
    assert_eq!(decision.risk(), RiskLevel::Critical);

    let mut ui = MockUI::new();
    ui.set_prompt_response(CONFIRM_WORD_KEY, "staging");
    let state = ConfirmationProtocol::new(true)
        .run(&decision, &resolved.name, OperationKind::Reset, &mut ui)
        .unwrap();
    assert_eq!(state, ConfirmationState::Declined);
    assert!(ui.prompts_shown().is_empty());
}
