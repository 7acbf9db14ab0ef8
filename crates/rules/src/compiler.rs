use tracing::{debug, instrument};

use crate::diagnostic::Diagnostic;
use crate::filter::KeyspaceFilter;
use crate::ir::rule::Polarity;
use crate::ir::spec::Spec;

/// Column the server-side clause filters on.
const NAME_COLUMN: &str = "keyspace_name";

/// The result of compiling a list of specs: the filter plus every
/// non-fatal finding, in encounter order.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The compiled, immutable filter.
    pub filter: KeyspaceFilter,
    /// Skipped specs and advisories, for the caller to route to its log.
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// Emit every diagnostic as a `WARN` tracing event and return the filter.
    pub fn log_diagnostics(self) -> KeyspaceFilter {
        for diagnostic in &self.diagnostics {
            diagnostic.log();
        }
        self.filter
    }
}

/// Compile `specs` into a [`KeyspaceFilter`].
///
/// Never fails: specs that cannot be classified or whose regex does not
/// compile are skipped and reported in [`Compilation::diagnostics`].
///
/// When every inclusion is an exact name, the inclusions are moved into a
/// server-side `WHERE keyspace_name IN (...)` clause and dropped from the
/// client-side predicate. Exclusions always stay client side.
#[instrument(skip_all, fields(label = %label, specs = specs.len()))]
pub fn compile<S: AsRef<str>>(label: &str, specs: &[S]) -> Compilation {
    let mut inclusions = Vec::new();
    let mut exclusions = Vec::new();
    let mut exact_names = Vec::new();
    let mut diagnostics = Vec::new();

    for raw in specs {
        let spec = match Spec::parse(raw.as_ref()) {
            Ok(spec) => spec,
            Err(e) => {
                diagnostics.push(Diagnostic::from_spec_error(label, e));
                continue;
            }
        };
        let polarity = spec.polarity();
        let rule = match spec.into_rule() {
            Ok(rule) => rule,
            Err(e) => {
                diagnostics.push(Diagnostic::from_spec_error(label, e));
                continue;
            }
        };
        match polarity {
            Polarity::Include => {
                if let Some(name) = rule.exact_name() {
                    exact_names.push(name.to_owned());
                }
                inclusions.push(rule);
            }
            Polarity::Exclude => exclusions.push(rule),
        }
    }

    let where_clause = if !inclusions.is_empty() && exact_names.len() == inclusions.len() {
        inclusions.clear();
        if !exclusions.is_empty() {
            diagnostics.push(Diagnostic::redundant_exclusions(label));
        }
        build_where_clause(&exact_names)
    } else {
        String::new()
    };

    debug!(
        inclusions = inclusions.len(),
        exclusions = exclusions.len(),
        server_side = !where_clause.is_empty(),
        skipped = diagnostics.len(),
        "compiled keyspace filter"
    );

    Compilation {
        filter: KeyspaceFilter::from_parts(inclusions, exclusions, where_clause),
        diagnostics,
    }
}

/// Build ` WHERE keyspace_name IN ('a','b',...)`, preserving order and duplicates.
fn build_where_clause(names: &[String]) -> String {
    let quoted = names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(",");
    format!(" WHERE {NAME_COLUMN} IN ({quoted})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::ir::rule::Rule;

    #[test]
    fn where_clause_quotes_and_joins() {
        assert_eq!(
            build_where_clause(&["ks1".into(), "ks2".into()]),
            " WHERE keyspace_name IN ('ks1','ks2')"
        );
        assert_eq!(
            build_where_clause(&["only".into()]),
            " WHERE keyspace_name IN ('only')"
        );
    }

    #[test]
    fn where_clause_keeps_duplicates() {
        let compilation = compile("test", &["ks1", "ks1"]);
        assert_eq!(
            compilation.filter.where_clause(),
            " WHERE keyspace_name IN ('ks1','ks1')"
        );
    }

    #[test]
    fn optimization_clears_inclusions() {
        let compilation = compile("test", &["ks1", "ks2"]);
        assert!(compilation.filter.inclusions().is_empty());
        assert!(compilation.filter.exclusions().is_empty());
        assert!(compilation.diagnostics.is_empty());
    }

    #[test]
    fn regex_inclusion_keeps_every_inclusion_client_side() {
        let compilation = compile("test", &["ks1", "/KS.*/"]);
        assert_eq!(compilation.filter.where_clause(), "");
        assert_eq!(
            compilation.filter.inclusions(),
            &[Rule::exact("ks1"), Rule::pattern("KS.*").unwrap()]
        );
    }

    #[test]
    fn exact_exclusions_do_not_count_as_candidates() {
        let compilation = compile("test", &["!system", "!OpsCenter"]);
        assert_eq!(compilation.filter.where_clause(), "");
        assert_eq!(
            compilation.filter.exclusions(),
            &[Rule::exact("system"), Rule::exact("OpsCenter")]
        );
    }

    #[test]
    fn diagnostics_follow_encounter_order() {
        let compilation = compile("s0", &["//", "ks1", "/*/", "bad name"]);
        let specs: Vec<_> = compilation
            .diagnostics
            .iter()
            .map(|d| d.spec.as_str())
            .collect();
        assert_eq!(specs, vec!["//", "*", "bad name"]);
        assert_eq!(
            compilation.diagnostics[0].kind,
            DiagnosticKind::UnrecognizedSpecShape
        );
        assert!(matches!(
            compilation.diagnostics[1].kind,
            DiagnosticKind::InvalidRegexSyntax { .. }
        ));
        assert!(compilation.diagnostics.iter().all(|d| d.label == "s0"));
    }

    #[test]
    fn redundant_exclusion_advisory_is_last() {
        let compilation = compile("s0", &["ks1", "!ks2", "??"]);
        assert_eq!(compilation.diagnostics.len(), 2);
        assert_eq!(
            compilation.diagnostics[1].kind,
            DiagnosticKind::RedundantExclusions
        );
        assert_eq!(
            compilation.filter.where_clause(),
            " WHERE keyspace_name IN ('ks1')"
        );
    }

    #[test]
    fn no_advisory_without_optimization() {
        let compilation = compile("s0", &["/ks.*/", "!ks2"]);
        assert!(compilation.diagnostics.is_empty());
    }

    #[test]
    fn accepts_owned_strings() {
        let specs = vec![String::from(" ks1 "), String::from("!/^system/")];
        let compilation = compile("test", &specs[..]);
        assert_eq!(
            compilation.filter.where_clause(),
            " WHERE keyspace_name IN ('ks1')"
        );
        assert!(!compilation.filter.includes("system_auth"));
    }

    #[test]
    fn log_diagnostics_returns_filter() {
        let filter = compile("test", &["ks1", "//"]).log_diagnostics();
        assert_eq!(filter.where_clause(), " WHERE keyspace_name IN ('ks1')");
    }
}
