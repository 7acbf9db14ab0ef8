use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single filter spec is rejected during compilation.
///
/// These never escape [`compile`](crate::compile): the offending spec is
/// skipped and the error is turned into a [`Diagnostic`](crate::Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The spec matches none of the exact-name or `/regex/` shapes.
    #[error("invalid element '{0}'")]
    UnrecognizedShape(String),

    /// The spec is shaped like a regex but its body does not compile.
    #[error("syntax error in regex /{pattern}/ ({reason})")]
    InvalidRegex {
        /// The text between the slashes.
        pattern: String,
        /// The regex engine's error message.
        reason: String,
    },
}

/// Errors raised while loading a [`FilterConfig`](crate::FilterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
