mod interactive;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use csvconv::{load_config, BatchDriver, Config, ConfigError, ConversionReport, Converter};

const RULE: &str = "============================================================";
const SEPARATOR: &str = "------------------------------------------------------------";

#[derive(Parser)]
#[command(name = "csvconv")]
#[command(author, version, about = "Convert Big5/GBK/ANSI encoded CSV files to UTF-8 with BOM", long_about = None)]
pub struct Cli {
    /// CSV file to convert in place, or a folder whose CSV files are all converted.
    /// Prompts interactively when omitted.
    pub path: Option<PathBuf>,

    /// Write the converted file here instead of overwriting the source
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("--output only applies to a single file, '{0}' is a folder")]
    OutputWithDirectory(PathBuf),
}

/// What a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // Route `log` records from dependencies and the scanner into tracing
    if tracing_log::LogTracer::init().is_err() {
        eprintln!("Logger already initialized");
    }
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Tracing subscriber already initialized");
    }
}

pub fn run(args: Cli) -> Result<ExitCode, CliError> {
    let config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => Config::default(),
    };

    let target = match &args.path {
        Some(path) if path.is_dir() => Target::Directory(path.clone()),
        Some(path) if path.exists() => Target::File(path.clone()),
        Some(path) => {
            eprintln!("File or folder not found: {}", path.display());
            return Ok(ExitCode::FAILURE);
        }
        None => match interactive::prompt()? {
            Some(target) => target,
            None => {
                eprintln!("No option selected");
                return Ok(ExitCode::FAILURE);
            }
        },
    };
    debug!("Target: {:?}", target);

    if !args.json {
        println!("{}", RULE);
        println!("CSV encoding converter - UTF-8 with BOM");
        println!("{}\n", RULE);
    }

    let ok = match target {
        Target::File(path) => convert_file(&config, &path, args.output.as_deref(), args.json)?,
        Target::Directory(path) => {
            if args.output.is_some() {
                return Err(CliError::OutputWithDirectory(path));
            }
            convert_directory(&config, &path, args.json)?
        }
    };

    if !args.json {
        println!("\n{}", RULE);
        println!("Done!");
        println!("{}", RULE);
    }

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn convert_file(
    config: &Config,
    path: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<bool, CliError> {
    let converter = Converter::from_config(config);
    let report = converter.convert_report(path, output);
    let ok = !report.outcome.is_failure();

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }
    Ok(ok)
}

fn convert_directory(config: &Config, path: &Path, json: bool) -> Result<bool, CliError> {
    let driver = BatchDriver::from_config(config);
    let report = match driver.run(path) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };

    if json {
        print_json(&report)?;
    } else {
        if !report.is_empty() {
            println!("Found {} CSV files\n", report.results.len());
        }
        for result in &report.results {
            print_report(result);
            println!("{}", SEPARATOR);
        }
        println!("{}", report);
    }
    Ok(!report.has_failures())
}

fn print_report(report: &ConversionReport) {
    println!("{}", report);
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_path_and_output() {
        let cli = Cli::parse_from(["csvconv", "data.csv", "--output", "out.csv", "--json"]);
        assert_eq!(cli.path, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert!(cli.json);
    }

    #[test]
    fn test_no_arguments_means_interactive() {
        let cli = Cli::parse_from(["csvconv"]);
        assert!(cli.path.is_none());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["csvconv", "-v", "-q"]).is_err());
    }
}
