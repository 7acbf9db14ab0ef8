use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::SpecError;

/// Which rule list a spec contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// The name must match at least one inclusion (if any exist).
    Include,
    /// The name must match no exclusion.
    Exclude,
}

/// A compiled predicate over a keyspace name.
///
/// Exact rules keep their literal so the compiler can promote them into a
/// server-side `IN` clause. Pattern rules search the name anywhere, so
/// `/KS/` matches `MY_KS_1`; anchor with `^` and `$` for a full match.
/// Classes such as `\w` are Unicode-aware; write `(?-u:\w)` for ASCII only.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Literal equality with the name.
    Exact(String),
    /// Unanchored regex search over the name.
    Pattern(Regex),
}

impl Rule {
    /// Build an exact-name rule.
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    /// Compile a regex body (the text between the slashes) into a rule.
    pub fn pattern(pattern: &str) -> Result<Self, SpecError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| SpecError::InvalidRegex {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Test whether `name` satisfies this rule.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(literal) => literal == name,
            Self::Pattern(re) => re.is_match(name),
        }
    }

    /// The literal name for exact rules, `None` for patterns.
    pub fn exact_name(&self) -> Option<&str> {
        match self {
            Self::Exact(literal) => Some(literal),
            Self::Pattern(_) => None,
        }
    }

    /// Render the rule in spec syntax, without the `!` prefix.
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(literal) => f.write_str(literal),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns `true` if any rule in `rules` matches `name`.
pub(crate) fn matches_any(rules: &[Rule], name: &str) -> bool {
    rules.iter().any(|rule| rule.matches(name))
}
