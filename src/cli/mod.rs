//! Command-line interface.

pub mod commands;
pub mod context;
pub mod display;
pub mod output;
pub mod prompt;
pub mod types;

use colored::Colorize;

use crate::infrastructure::logging::SecretScrubbingLayer;

pub use types::{Cli, Commands};

/// Print a command failure with secrets scrubbed and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let message = SecretScrubbingLayer::new().scrub_message(&format!("{err:#}"));
    if json_mode {
        let body = serde_json::json!({ "error": message });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {message}", "Error:".red().bold());
    }
    std::process::exit(1)
}
