//! ctxpack CLI entry point.
//!
//! Commands:
//! - `render`   Render relevant files into a framed context document
//! - `inspect`  Show which files land in which region, and why
//! - `onboard`  Initialize the config file
//! - `status`   Show effective configuration

use clap::{Parser, Subcommand};
use ctxpack_config::OutputFormat;
use std::path::PathBuf;

mod commands;

use commands::input::InputArgs;

#[derive(Parser)]
#[command(
    name = "ctxpack",
    about = "Deterministic file-context assembler",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render relevant files into a framed context document
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which files land in which region
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Report format (text or json); overrides output.default_format
        #[arg(long, value_name = "FORMAT", conflicts_with = "json")]
        format: Option<OutputFormat>,

        /// Shorthand for --format json
        #[arg(long)]
        json: bool,
    },

    /// Initialize the configuration file
    Onboard,

    /// Show effective configuration
    Status,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { input, output } => commands::render::run(&input, output.as_deref())?,
        Commands::Inspect {
            input,
            format,
            json,
        } => commands::inspect::run(&input, requested_format(format, json))?,
        Commands::Onboard => commands::onboard::run()?,
        Commands::Status => commands::status::run()?,
    }

    Ok(())
}

/// `--json` is shorthand for `--format json`.
fn requested_format(format: Option<OutputFormat>, json: bool) -> Option<OutputFormat> {
    if json { Some(OutputFormat::Json) } else { format }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect_format(args: &[&str]) -> Option<OutputFormat> {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Inspect { format, json, .. } => requested_format(format, json),
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn inspect_format_flag_parses() {
        assert_eq!(
            inspect_format(&["ctxpack", "inspect", "--format", "text"]),
            Some(OutputFormat::Text)
        );
        assert_eq!(
            inspect_format(&["ctxpack", "inspect", "--format", "json"]),
            Some(OutputFormat::Json)
        );
        assert_eq!(inspect_format(&["ctxpack", "inspect", "--json"]), Some(OutputFormat::Json));
        assert_eq!(inspect_format(&["ctxpack", "inspect"]), None);
    }

    #[test]
    fn json_and_format_conflict() {
        assert!(Cli::try_parse_from(["ctxpack", "inspect", "--json", "--format", "text"]).is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["ctxpack", "inspect", "--format", "yaml"]).is_err());
    }
}
