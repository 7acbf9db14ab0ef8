//! Classification of raw filter specs.
//!
//! A spec is one of four shapes, tried in this order:
//! - `name` — exact inclusion
//! - `!name` — exact exclusion
//! - `/regex/` — pattern inclusion
//! - `!/regex/` — pattern exclusion
//!
//! Names are one or more ASCII word characters. Regex bodies must be
//! non-empty and run from the first to the last slash.

use std::sync::LazyLock;

use regex::Regex;

use super::rule::{Polarity, Rule};
use crate::error::SpecError;

static EXACT_NAME_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("exact include regex is valid"));

static EXACT_NAME_EXCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!([A-Za-z0-9_]+)$").expect("exact exclude regex is valid"));

static REGEX_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(.+)/$").expect("regex include regex is valid"));

static REGEX_EXCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!/(.+)/$").expect("regex exclude regex is valid"));

/// A spec string sorted into one of the four recognized shapes.
///
/// The payload is the literal name or the regex body, with the `!` and
/// slashes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    /// `name`
    ExactInclude(String),
    /// `!name`
    ExactExclude(String),
    /// `/regex/`
    RegexInclude(String),
    /// `!/regex/`
    RegexExclude(String),
}

impl Spec {
    /// Classify a spec. Surrounding spaces and ASCII control characters are ignored.
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let spec = raw.trim_matches(|c: char| c <= ' ');
        if EXACT_NAME_INCLUDE.is_match(spec) {
            return Ok(Self::ExactInclude(spec.to_owned()));
        }
        if let Some(name) = capture(&EXACT_NAME_EXCLUDE, spec) {
            return Ok(Self::ExactExclude(name));
        }
        if let Some(body) = capture(&REGEX_INCLUDE, spec) {
            return Ok(Self::RegexInclude(body));
        }
        if let Some(body) = capture(&REGEX_EXCLUDE, spec) {
            return Ok(Self::RegexExclude(body));
        }
        Err(SpecError::UnrecognizedShape(spec.to_owned()))
    }

    /// Which rule list this spec feeds.
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::ExactInclude(_) | Self::RegexInclude(_) => Polarity::Include,
            Self::ExactExclude(_) | Self::RegexExclude(_) => Polarity::Exclude,
        }
    }

    /// Compile the spec into a rule. Only regex shapes can fail.
    pub fn into_rule(self) -> Result<Rule, SpecError> {
        match self {
            Self::ExactInclude(name) | Self::ExactExclude(name) => Ok(Rule::Exact(name)),
            Self::RegexInclude(body) | Self::RegexExclude(body) => Rule::pattern(&body),
        }
    }
}

fn capture(re: &Regex, spec: &str) -> Option<String> {
    re.captures(spec)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}
