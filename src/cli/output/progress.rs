//! Spinners for long-running remote calls.
//!
//! Spinners draw to stderr and are hidden in JSON mode or when stderr is
//! not a terminal, so piped output stays clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner
///
/// # Example
/// ```
/// use lpo_sync::cli::output::progress::create_spinner;
///
/// let spinner = create_spinner(true);
/// spinner.set_message("Validating candidates...");
/// // do work
/// spinner.finish_and_clear();
/// ```
pub fn create_spinner(hidden: bool) -> ProgressBar {
    if hidden || !console::Term::stderr().is_term() {
        return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .expect("Invalid spinner template")
            .tick_chars(SPINNER_CHARS),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Create a spinner with a message
pub fn create_spinner_with_message(message: impl Into<String>, hidden: bool) -> ProgressBar {
    let spinner = create_spinner(hidden);
    spinner.set_message(message.into());
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner() {
        let spinner = create_spinner_with_message("Reading dashboard", true);
        assert!(spinner.is_hidden());
        assert_eq!(spinner.message(), "Reading dashboard");
        spinner.finish_and_clear();
    }
}
