//! Branch glob patterns.
//!
//! `*` matches any run of characters (including none) and `?` matches
//! exactly one character. Matching is case-sensitive, anchored at both
//! ends, and `/` has no special meaning, so `feature/*` matches
//! `feature/auth/oauth`.

use regex::Regex;

/// A compiled branch pattern.
#[derive(Debug, Clone)]
pub struct BranchPattern {
    raw: String,
    regex: Option<Regex>,
}

impl BranchPattern {
    /// Compile a pattern string.
    pub fn new(raw: &str) -> Self {
        let regex = if has_wildcards(raw) {
            Regex::new(&glob_to_regex(raw)).ok()
        } else {
            None
        };
        Self {
            raw: raw.to_string(),
            regex,
        }
    }

    /// The pattern as written in config.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern contains `*` or `?`.
    pub fn is_wildcard(&self) -> bool {
        has_wildcards(&self.raw)
    }

    /// Exact string equality with `branch`.
    pub fn matches_exact(&self, branch: &str) -> bool {
        self.raw == branch
    }

    /// Glob match against `branch`.
    ///
    /// A pattern without wildcards only matches itself.
    pub fn matches_wildcard(&self, branch: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(branch),
            None => self.matches_exact(branch),
        }
    }
}

impl PartialEq for BranchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for BranchPattern {}

impl From<&str> for BranchPattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Translate a glob into an anchored regex, escaping everything else.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("^(?s:");
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push_str(")$");
    out
}
