//! ksfilter CLI
//!
//! Compiles keyspace filter specs from a config file or the command line and
//! shows what a schema metadata refresh would retrieve.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ksfilter_rules::FilterConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// ksfilter — inspect and test keyspace filters.
#[derive(Parser, Debug)]
#[command(name = "ksfilter", version, about)]
struct Cli {
    /// TOML file with a `[metadata.schema]` table.
    #[arg(long, env = "KSFILTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Label prefixed to diagnostics (overrides the config file).
    #[arg(long, global = true)]
    label: Option<String>,

    /// Filter spec; repeat to build a list (replaces the configured list).
    #[arg(long = "spec", value_name = "SPEC", global = true)]
    specs: Vec<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the server-side clause and the client-side rules.
    Show,
    /// Evaluate keyspace names against the filter.
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then flag overrides.
    fn filter_config(&self) -> anyhow::Result<FilterConfig> {
        let mut config = match &self.config {
            Some(path) => FilterConfig::load(path)?,
            None => FilterConfig::default(),
        };
        if let Some(label) = &self.label {
            config.label.clone_from(label);
        }
        if !self.specs.is_empty() {
            let schema = &mut config.metadata.schema;
            schema.refreshed_keyspaces.clone_from(&self.specs);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.filter_config()?;
    debug!(
        label = %config.label,
        specs = ?config.refreshed_keyspaces(),
        "loaded filter configuration"
    );

    let compilation = config.compile();
    for diagnostic in &compilation.diagnostics {
        diagnostic.log();
    }

    match cli.command {
        Command::Show => commands::show::run(&config.label, &compilation, &cli.format),
        Command::Check(args) => commands::check::run(&compilation.filter, &args, &cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_override_defaults() {
        let cli = Cli::try_parse_from([
            "ksfilter", "--spec", "ks1", "--spec", "!/.*2/", "--label", "s9", "show",
        ])
        .unwrap();
        let config = cli.filter_config().unwrap();
        assert_eq!(config.label, "s9");
        assert_eq!(config.refreshed_keyspaces(), &["ks1", "!/.*2/"]);
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["ksfilter", "check", "ks1"]).unwrap();
        let config = cli.filter_config().unwrap();
        assert_eq!(config.label, "s0");
        assert!(config.refreshed_keyspaces().contains(&"!system".to_owned()));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = ["ksfilter", "--config", "/nonexistent.toml", "show"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.filter_config().is_err());
    }
}
