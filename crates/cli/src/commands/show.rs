use ksfilter_rules::{Compilation, Diagnostic, Rule};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct FilterReport<'a> {
    label: &'a str,
    where_clause: &'a str,
    inclusions: &'a [Rule],
    exclusions: &'a [Rule],
    diagnostics: &'a [Diagnostic],
}

pub fn run(label: &str, compilation: &Compilation, format: &OutputFormat) -> anyhow::Result<()> {
    let filter = &compilation.filter;
    match format {
        OutputFormat::Json => {
            let report = FilterReport {
                label,
                where_clause: filter.where_clause(),
                inclusions: filter.inclusions(),
                exclusions: filter.exclusions(),
                diagnostics: &compilation.diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if filter.is_server_side() {
                println!("Server-side clause:{}", filter.where_clause());
            } else {
                println!("Server-side clause: (none)");
            }
            print_rules("Inclusions", filter.inclusions(), "");
            print_rules("Exclusions", filter.exclusions(), "!");
            if !compilation.diagnostics.is_empty() {
                println!("{} diagnostics:", compilation.diagnostics.len());
                for diagnostic in &compilation.diagnostics {
                    println!("  {diagnostic}");
                }
            }
        }
    }
    Ok(())
}

fn print_rules(heading: &str, rules: &[Rule], prefix: &str) {
    if rules.is_empty() {
        println!("{heading}: (none)");
        return;
    }
    println!("{heading}:");
    for rule in rules {
        println!("  {prefix}{rule}");
    }
}
