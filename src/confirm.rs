//! Confirmation protocol.
//!
//! Turns a guard decision that requires confirmation into a final go/no-go.
//!
//! ```text
//! blocked ─────────────────────────────────▶ Declined
//! NotRequired ─────────────────────────────▶ allow
//! AwaitingConfirmation ─┬─ CI ─────────────▶ Declined
//!                       ├─ typed word ok ──▶ Confirmed
//!                       ├─ yes ────────────▶ Confirmed
//!                       ├─ wrong / no ─────▶ Declined
//!                       └─ Esc / Ctrl-C ───▶ Cancelled
//! ```
//!
//! The `--yes` bypass is checked by the calling command before the
//! protocol starts; the protocol itself never skips a required confirmation.

use tracing::{debug, info};

use crate::error::Result;
use crate::guard::GuardResult;
use crate::operation::{OperationKind, RiskLevel};
use crate::ui::{Prompt, PromptResult, UserInterface};

/// Prompt key for typed confirmation.
pub const CONFIRM_WORD_KEY: &str = "confirm_word";

/// Prompt key for yes/no confirmation.
pub const CONFIRM_KEY: &str = "confirm";

/// States of the confirmation exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Nothing to confirm.
    NotRequired,
    /// Waiting for the user's answer.
    AwaitingConfirmation,
    /// The user confirmed.
    Confirmed,
    /// The user (or CI mode) declined.
    Declined,
    /// The user dismissed the prompt.
    Cancelled,
}

impl ConfirmationState {
    /// Initial state for a guard decision.
    ///
    /// A blocked decision is declined outright; it can never be confirmed.
    pub fn for_result(result: &GuardResult) -> Self {
        if result.is_blocked() {
            Self::Declined
        } else if result.requires_confirmation {
            Self::AwaitingConfirmation
        } else {
            Self::NotRequired
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::AwaitingConfirmation)
    }

    /// Whether the operation may proceed.
    pub fn allows(self) -> bool {
        matches!(self, Self::NotRequired | Self::Confirmed)
    }
}

/// What is being confirmed.
#[derive(Debug, Clone)]
pub struct ConfirmationRequest<'a> {
    pub environment: &'a str,
    pub operation: OperationKind,
    pub risk_level: RiskLevel,
    pub confirm_word: Option<&'a str>,
}

impl<'a> ConfirmationRequest<'a> {
    /// Build a request from the combined guard result.
    pub fn from_result(
        environment: &'a str,
        operation: OperationKind,
        result: &'a GuardResult,
    ) -> Self {
        Self {
            environment,
            operation,
            risk_level: result.risk(),
            confirm_word: result.confirm_word.as_deref(),
        }
    }

    /// The word to type, if typed confirmation applies.
    ///
    /// Critical operations always need a typed word and fall back to the
    /// environment name.
    pub fn typed_word(&self) -> Option<&'a str> {
        match self.confirm_word {
            Some(word) => Some(word),
            None if self.risk_level == RiskLevel::Critical => Some(self.environment),
            None => None,
        }
    }
}

/// Drives the confirmation exchange.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationProtocol {
    ci: bool,
}

impl ConfirmationProtocol {
    /// Create a protocol; `ci` disables prompting entirely.
    pub fn new(ci: bool) -> Self {
        Self { ci }
    }

    /// Run the protocol for a guard decision.
    pub fn run(
        &self,
        result: &GuardResult,
        environment: &str,
        operation: OperationKind,
        ui: &mut dyn UserInterface,
    ) -> Result<ConfirmationState> {
        match ConfirmationState::for_result(result) {
            ConfirmationState::AwaitingConfirmation => {
                let request = ConfirmationRequest::from_result(environment, operation, result);
                self.resolve(&request, ui)
            }
            state => Ok(state),
        }
    }

    /// Move a pending request to a terminal state.
    pub fn resolve(
        &self,
        request: &ConfirmationRequest<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<ConfirmationState> {
        if self.ci {
            info!(
                "Confirmation for {} on '{}' declined: non-interactive mode",
                request.operation, request.environment
            );
            return Ok(ConfirmationState::Declined);
        }

        let state = match request.typed_word() {
            Some(word) => Self::ask_typed(request, word, ui)?,
            None => Self::ask_yes_no(request, ui)?,
        };
        debug!(
            "Confirmation for {} on '{}': {:?}",
            request.operation, request.environment, state
        );
        Ok(state)
    }

    fn ask_typed(
        request: &ConfirmationRequest<'_>,
        word: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<ConfirmationState> {
        ui.warning(&format!(
            "{} on '{}' is a {} risk operation",
            request.operation, request.environment, request.risk_level
        ));
        let prompt = Prompt::input(
            CONFIRM_WORD_KEY,
            format!("Type '{}' to continue", word),
        );
        Ok(match ui.prompt(&prompt)? {
            PromptResult::Cancelled => ConfirmationState::Cancelled,
            PromptResult::String(answer) if answer.trim() == word => ConfirmationState::Confirmed,
            _ => {
                ui.error(&format!("Input did not match '{}'", word));
                ConfirmationState::Declined
            }
        })
    }

    fn ask_yes_no(
        request: &ConfirmationRequest<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<ConfirmationState> {
        let prompt = Prompt::confirm(
            CONFIRM_KEY,
            format!(
                "Run {} on '{}' ({} risk)?",
                request.operation, request.environment, request.risk_level
            ),
        );
        Ok(match ui.prompt(&prompt)? {
            PromptResult::Cancelled => ConfirmationState::Cancelled,
            PromptResult::Bool(true) => ConfirmationState::Confirmed,
            _ => ConfirmationState::Declined,
        })
    }
}
