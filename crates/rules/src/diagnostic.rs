use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::SpecError;

/// Configuration key the keyspace specs are read from.
pub const REFRESHED_KEYSPACES_OPTION: &str = "advanced.metadata.schema.refreshed-keyspaces";

/// What went wrong (or looks suspicious) while compiling a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The spec matches none of the recognized shapes; it was skipped.
    UnrecognizedSpecShape,
    /// The spec is a `/regex/` whose body does not compile; it was skipped.
    InvalidRegexSyntax {
        /// The regex engine's error message.
        reason: String,
    },
    /// Only exact-name inclusions were given, yet exclusions exist too.
    ///
    /// Advisory only: the filter still applies both.
    RedundantExclusions,
}

/// A single non-fatal finding produced by [`compile`](crate::compile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Identifies the owner of the filter in log output (e.g. a session name).
    pub label: String,
    /// Configuration key the specs came from.
    pub option: String,
    /// The offending spec text. For regex errors this is the body between
    /// the slashes; empty for advisories that are not tied to one spec.
    pub spec: String,
    /// The finding.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub(crate) fn from_spec_error(label: &str, error: SpecError) -> Self {
        let (spec, kind) = match error {
            SpecError::UnrecognizedShape(spec) => (spec, DiagnosticKind::UnrecognizedSpecShape),
            SpecError::InvalidRegex { pattern, reason } => {
                (pattern, DiagnosticKind::InvalidRegexSyntax { reason })
            }
        };
        Self {
            label: label.to_owned(),
            option: REFRESHED_KEYSPACES_OPTION.to_owned(),
            spec,
            kind,
        }
    }

    pub(crate) fn redundant_exclusions(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            option: REFRESHED_KEYSPACES_OPTION.to_owned(),
            spec: String::new(),
            kind: DiagnosticKind::RedundantExclusions,
        }
    }

    /// Emit this diagnostic as a `WARN` tracing event.
    pub fn log(&self) {
        match &self.kind {
            DiagnosticKind::UnrecognizedSpecShape => {
                warn!(
                    label = %self.label,
                    option = %self.option,
                    spec = %self.spec,
                    "invalid filter element, skipping"
                );
            }
            DiagnosticKind::InvalidRegexSyntax { reason } => {
                warn!(
                    label = %self.label,
                    option = %self.option,
                    spec = %self.spec,
                    reason = %reason,
                    "syntax error in filter regex, skipping"
                );
            }
            DiagnosticKind::RedundantExclusions => {
                warn!(
                    label = %self.label,
                    option = %self.option,
                    "filter only includes explicit keyspace names but also defines exclusions; \
                     this can probably be simplified"
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnrecognizedSpecShape => write!(
                f,
                "[{}] Error while parsing {}: invalid element '{}', skipping",
                self.label, self.option, self.spec
            ),
            DiagnosticKind::InvalidRegexSyntax { reason } => write!(
                f,
                "[{}] Error while parsing {}: syntax error in regex /{}/ ({reason}), skipping",
                self.label, self.option, self.spec
            ),
            DiagnosticKind::RedundantExclusions => write!(
                f,
                "[{}] {} only includes explicit keyspace names, but also defines exclusions. \
                 This can probably be simplified.",
                self.label, self.option
            ),
        }
    }
}
