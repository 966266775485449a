use clap::Args;
use haystack_core::{AssertionResult, Raw, SubsetError};
use serde::Serialize;

use crate::{report_error, OutputFormat, EXIT_FAILED, EXIT_INPUT_ERROR};

#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct CheckFlags {
    /// Treat operands as JSON text instead of file paths
    #[arg(long)]
    pub inline: bool,
    /// Succeed only if the needle is NOT a subset
    #[arg(long)]
    pub negate: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    success: bool,
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mismatch: Option<String>,
}

pub(crate) fn cmd_check(
    needle_arg: &str,
    haystack_arg: &str,
    flags: CheckFlags,
    output: OutputFormat,
    quiet: bool,
) -> i32 {
    let (needle, haystack) = match load_pair(needle_arg, haystack_arg, flags.inline) {
        Ok(pair) => pair,
        Err(msg) => {
            report_error(&msg, output, quiet);
            return EXIT_INPUT_ERROR;
        }
    };
    finish(
        haystack_core::is_subset_of(needle, haystack),
        flags,
        output,
        quiet,
    )
}

pub(crate) fn cmd_contains(
    haystack_arg: &str,
    needle_arg: &str,
    flags: CheckFlags,
    output: OutputFormat,
    quiet: bool,
) -> i32 {
    let (haystack, needle) = match load_pair(haystack_arg, needle_arg, flags.inline) {
        Ok(pair) => pair,
        Err(msg) => {
            report_error(&msg, output, quiet);
            return EXIT_INPUT_ERROR;
        }
    };
    finish(
        haystack_core::has_subset(haystack, needle),
        flags,
        output,
        quiet,
    )
}

fn load_pair(first: &str, second: &str, inline: bool) -> Result<(Raw, Raw), String> {
    Ok((load_operand(first, inline)?, load_operand(second, inline)?))
}

/// Operands always reach the facade as JSON text, so malformed input is
/// reported with the needle/haystack wording.
fn load_operand(arg: &str, inline: bool) -> Result<Raw, String> {
    if inline {
        return Ok(Raw::json(arg));
    }
    tracing::debug!(path = arg, "reading operand");
    std::fs::read_to_string(arg)
        .map(Raw::json)
        .map_err(|e| format!("error reading '{}': {}", arg, e))
}

fn finish(
    result: Result<AssertionResult, SubsetError>,
    flags: CheckFlags,
    output: OutputFormat,
    quiet: bool,
) -> i32 {
    let mut result = match result {
        Ok(r) => r,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            return EXIT_INPUT_ERROR;
        }
    };
    if flags.negate {
        result = result.negate();
    }

    let success = result.is_success();
    let report = CheckReport {
        success,
        message: (!success).then(|| result.failure_message()),
        mismatch: result.mismatch().map(|m| m.to_string()),
    };

    if !quiet {
        match output {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_default()
                );
            }
            OutputFormat::Text => match report.message {
                None => println!("ok"),
                Some(message) => {
                    println!("{}", message);
                    if let Some(mismatch) = &report.mismatch {
                        println!("  {}", mismatch);
                    }
                }
            },
        }
    }

    if success {
        0
    } else {
        EXIT_FAILED
    }
}
