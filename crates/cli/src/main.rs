mod check;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Exit code when the assertion fails.
pub(crate) const EXIT_FAILED: i32 = 1;
/// Exit code for unreadable files and malformed JSON.
pub(crate) const EXIT_INPUT_ERROR: i32 = 2;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Structural subset checks for JSON documents.
#[derive(Parser)]
#[command(
    name = "haystack",
    version,
    about = "Structural subset checks for JSON documents"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log matching decisions to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that NEEDLE is a subset of HAYSTACK
    Check {
        /// Path to the needle JSON file (or JSON text with --inline)
        needle: String,
        /// Path to the haystack JSON file (or JSON text with --inline)
        haystack: String,
        #[command(flatten)]
        flags: check::CheckFlags,
    },

    /// Check that HAYSTACK contains NEEDLE
    Contains {
        /// Path to the haystack JSON file (or JSON text with --inline)
        haystack: String,
        /// Path to the needle JSON file (or JSON text with --inline)
        needle: String,
        #[command(flatten)]
        flags: check::CheckFlags,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Check {
            needle,
            haystack,
            flags,
        } => check::cmd_check(&needle, &haystack, flags, cli.output, cli.quiet),
        Commands::Contains {
            haystack,
            needle,
            flags,
        } => check::cmd_contains(&haystack, &needle, flags, cli.output, cli.quiet),
    };
    process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error message respecting output format and quiet mode.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
