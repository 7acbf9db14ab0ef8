use std::io::BufRead;

use clap::Args;
use ksfilter_rules::KeyspaceFilter;
use serde::Serialize;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Keyspace names to test. Reads one name per line from stdin when omitted.
    pub names: Vec<String>,
}

#[derive(Serialize)]
struct CheckResult<'a> {
    name: &'a str,
    included: bool,
}

pub fn run(filter: &KeyspaceFilter, args: &CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let names = if args.names.is_empty() {
        read_names(std::io::stdin().lock())?
    } else {
        args.names.clone()
    };

    let results: Vec<CheckResult<'_>> = names
        .iter()
        .map(|name| CheckResult {
            name,
            included: filter.includes(name),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            for result in &results {
                let verdict = if result.included {
                    "included"
                } else {
                    "excluded"
                };
                println!("{verdict:<8}  {}", result.name);
            }
        }
    }
    Ok(())
}

/// Collect non-blank, trimmed lines.
fn read_names(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}
