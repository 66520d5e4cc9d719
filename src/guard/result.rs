//! Guard outcomes and their combination.

use crate::operation::RiskLevel;

/// Outcome of one guard, or of the whole chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardResult {
    /// Whether the operation may proceed.
    pub allowed: bool,
    /// Why the guard blocked (or a note when allowing).
    pub reason: Option<String>,
    /// Actionable hints, in the order they were produced.
    pub suggestions: Vec<String>,
    /// Severity contributed by this guard.
    pub risk_level: Option<RiskLevel>,
    /// Whether the user must confirm before proceeding.
    pub requires_confirmation: bool,
    /// The phrase the user must type, when typed confirmation applies.
    pub confirm_word: Option<String>,
}

impl GuardResult {
    /// An unconditional allow.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            suggestions: Vec::new(),
            risk_level: None,
            requires_confirmation: false,
            confirm_word: None,
        }
    }

    /// A block with the given reason and severity.
    pub fn block(reason: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            risk_level: Some(risk_level),
            ..Self::allow()
        }
    }

    /// Attach a risk level.
    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    /// Append a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Require confirmation with the given phrase.
    pub fn with_confirmation(mut self, confirm_word: impl Into<String>) -> Self {
        self.requires_confirmation = true;
        self.confirm_word = Some(confirm_word.into());
        self
    }

    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    /// Effective risk level (`Low` when no guard set one).
    pub fn risk(&self) -> RiskLevel {
        self.risk_level.unwrap_or_default()
    }

    /// Combine guard results into one decision.
    ///
    /// The first blocking result wins outright. Otherwise the combined result
    /// carries the highest risk level, requires confirmation if any result
    /// did, takes the first confirm word supplied, and merges suggestions
    /// without duplicates.
    pub fn combine<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a GuardResult>,
    {
        let mut combined = Self::allow();
        for result in results {
            if result.is_blocked() {
                return result.clone();
            }
            combined.risk_level = combined.risk_level.max(result.risk_level);
            combined.requires_confirmation |= result.requires_confirmation;
            if combined.confirm_word.is_none() {
                combined.confirm_word = result.confirm_word.clone();
            }
            for suggestion in &result.suggestions {
                if !combined.suggestions.contains(suggestion) {
                    combined.suggestions.push(suggestion.clone());
                }
            }
        }
        combined
    }
}
