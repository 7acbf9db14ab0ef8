use crate::compiler::compile;
use crate::ir::rule::{Rule, matches_any};

/// Decides which keyspaces a schema metadata refresh should consider.
///
/// Depending on the rules, filtering happens on the server with a
/// `WHERE ... IN` clause appended to every schema query, on the client with
/// [`includes`](Self::includes) applied to every fetched row, or both.
///
/// Built once by [`compile`] and never mutated, so it can be shared across
/// threads freely.
#[derive(Debug, Clone, Default)]
pub struct KeyspaceFilter {
    inclusions: Vec<Rule>,
    exclusions: Vec<Rule>,
    where_clause: String,
}

impl KeyspaceFilter {
    /// Compile `specs`, log any skipped spec as a warning, and return the filter.
    ///
    /// Use [`compile`] directly to handle diagnostics yourself.
    pub fn new<S: AsRef<str>>(label: &str, specs: &[S]) -> Self {
        compile(label, specs).log_diagnostics()
    }

    pub(crate) fn from_parts(
        inclusions: Vec<Rule>,
        exclusions: Vec<Rule>,
        where_clause: String,
    ) -> Self {
        debug_assert!(where_clause.is_empty() || inclusions.is_empty());
        Self {
            inclusions,
            exclusions,
            where_clause,
        }
    }

    /// The `WHERE IN` clause, or the empty string if there is no server-side filtering.
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    /// Whether the filter narrows results on the server.
    pub fn is_server_side(&self) -> bool {
        !self.where_clause.is_empty()
    }

    /// Inclusion rules evaluated on the client.
    pub fn inclusions(&self) -> &[Rule] {
        &self.inclusions
    }

    /// Exclusion rules evaluated on the client.
    pub fn exclusions(&self) -> &[Rule] {
        &self.exclusions
    }

    /// The predicate invoked for client-side filtering.
    ///
    /// A name is kept if it matches some inclusion (or there are none) and
    /// matches no exclusion. Exclusions always win.
    pub fn includes(&self, keyspace: &str) -> bool {
        (self.inclusions.is_empty() || matches_any(&self.inclusions, keyspace))
            && !matches_any(&self.exclusions, keyspace)
    }

    /// Apply [`includes`](Self::includes) to `names`, keeping their order.
    pub fn retain<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| self.includes(name))
            .collect()
    }
}
