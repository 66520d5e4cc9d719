//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show debug-level details (resolution, guard outcomes).
    Verbose,
    /// Show status messages.
    #[default]
    Normal,
    /// Show only warnings, prompts and errors.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows informational status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows details such as guard suggestions on success.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
