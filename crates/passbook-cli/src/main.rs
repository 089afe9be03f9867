use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use passbook_analysis::{CategoryEngine, StatementAnalyzer};
use passbook_core::StatementConfig;
use passbook_extract::TransactionBlockParser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod input;
mod report;

use input::StatementSource;
use report::StatementReport;

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Extract and analyze bank statement transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions and print the full analysis report as JSON
    Analyze {
        /// Statement file (.pdf or .txt)
        file: PathBuf,

        #[command(flatten)]
        options: Options,
    },

    /// Print only the extracted transactions as JSON
    Extract {
        /// Statement file (.pdf or .txt)
        file: PathBuf,

        #[command(flatten)]
        options: Options,
    },
}

#[derive(clap::Args, Debug)]
struct Options {
    /// Year for dates printed without one (overrides the config file)
    #[arg(long)]
    year: Option<i32>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, options } => {
            let config = load_config(options.config.as_deref(), options.year)?;
            let source = StatementSource::load(&file, &config.input)?;
            let parser = TransactionBlockParser::new(&config.parser);
            let analyzer = StatementAnalyzer::new(Arc::new(CategoryEngine::new()), &config.anomaly);

            let report = StatementReport::build(&source, &parser, &analyzer)?;
            print_json(&report, options.pretty)?;
        }

        Command::Extract { file, options } => {
            let config = load_config(options.config.as_deref(), options.year)?;
            let source = StatementSource::load(&file, &config.input)?;
            let parser = TransactionBlockParser::new(&config.parser);

            let records = report::extract(&source, &parser)?;
            print_json(&records, options.pretty)?;
        }
    }

    Ok(())
}

/// Defaults, then the config file, then `--year`.
fn load_config(path: Option<&Path>, year: Option<i32>) -> Result<StatementConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            StatementConfig::from_toml_str(&content)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => StatementConfig::default(),
    };
    if let Some(year) = year {
        config.parser.statement_year = year;
    }
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
