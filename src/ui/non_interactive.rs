//! Non-interactive UI for CI/headless environments.

use crate::error::{DbGuardError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Output is plain text on stderr. Prompts are answered from their default
/// when one exists; anything else is an error since nobody can answer.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        match (&prompt.prompt_type, &prompt.default) {
            (PromptType::Confirm, Some(default)) => Ok(PromptResult::Bool(matches!(
                default.as_str(),
                "true" | "yes" | "y"
            ))),
            (_, Some(default)) => Ok(PromptResult::String(default.clone())),
            (_, None) => Err(DbGuardError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ),
            }),
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            eprintln!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        eprintln!("  → {}", hint);
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
