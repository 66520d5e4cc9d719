//! Operation kinds and their static risk classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity attached to an operation in context.
///
/// Variants are ordered by severity: `Low < Medium < High < Critical`.
/// Combining guard results keeps the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Uppercase label for human-readable output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An operation that dbguard forwards to the migration CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Diff,
    Pull,
    Link,
    Push,
    Migrate,
    Unlink,
    Seed,
    Reset,
}

impl OperationKind {
    /// All operation kinds, in ascending risk order.
    pub const ALL: [OperationKind; 8] = [
        Self::Diff,
        Self::Pull,
        Self::Link,
        Self::Push,
        Self::Migrate,
        Self::Unlink,
        Self::Seed,
        Self::Reset,
    ];

    /// Config/CLI name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diff => "diff",
            Self::Pull => "pull",
            Self::Link => "link",
            Self::Push => "push",
            Self::Migrate => "migrate",
            Self::Unlink => "unlink",
            Self::Seed => "seed",
            Self::Reset => "reset",
        }
    }

    /// Static risk level of the operation.
    pub fn risk_level(self) -> RiskLevel {
        match self {
            Self::Diff | Self::Pull | Self::Link => RiskLevel::Low,
            Self::Push | Self::Migrate | Self::Unlink => RiskLevel::Medium,
            Self::Seed => RiskLevel::High,
            Self::Reset => RiskLevel::Critical,
        }
    }

    /// Read-only operations never touch the target database.
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Diff)
    }

    /// Operations subject to the lock and working-tree guards.
    pub fn is_destructive(self) -> bool {
        !self.is_read_only()
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation: {}", s))
    }
}
