//! Outcome marks and colors for CLI output.
//!
//! All coloring respects `NO_COLOR` env var automatically via the `colored` crate.

use colored::{ColoredString, Colorize};

pub fn check_mark() -> ColoredString {
    "✓".green().bold()
}

pub fn cross_mark() -> ColoredString {
    "✗".red().bold()
}

/// Color an outcome word.
///
/// Green: valid, transitioned, logged. Yellow: skipped, dry-run.
/// Red: invalid, failed.
pub fn colorize_outcome(outcome: &str) -> ColoredString {
    match outcome.to_lowercase().as_str() {
        "valid" | "transitioned" | "logged" | "ok" => outcome.green(),
        "skipped" | "dry-run" | "matched" => outcome.yellow(),
        "invalid" | "failed" | "error" => outcome.red().bold(),
        _ => outcome.normal(),
    }
}
