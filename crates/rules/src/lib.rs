//! Keyspace filtering for schema metadata refreshes.
//!
//! A list of filter specs (`ks1`, `!system`, `/^app_.*/`, `!/_tmp$/`) is
//! compiled into a [`KeyspaceFilter`] that exposes an optional server-side
//! `WHERE keyspace_name IN (...)` clause and a client-side
//! [`includes`](KeyspaceFilter::includes) predicate.

pub mod compiler;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod filter;
pub mod ir;

pub use compiler::{Compilation, compile};
pub use config::FilterConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, REFRESHED_KEYSPACES_OPTION};
pub use error::{ConfigError, SpecError};
pub use filter::KeyspaceFilter;
pub use ir::rule::{Polarity, Rule};
pub use ir::spec::Spec;
