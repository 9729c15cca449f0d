//! Terminal output on stderr: status messages, tables and spinners.
//!
//! stdout is reserved for machine-readable output (plan JSON, schema), so
//! everything here writes to stderr.
//!
//! # Examples
//!
//! ```no_run
//! use sheaf_cli::ui;
//!
//! ui::init_colors(false);
//!
//! let spinner = ui::Spinner::new("Discovering entries...");
//! spinner.clear();
//!
//! ui::success("Plan written");
//! ui::warning("Entry 'b.js' found in two groups");
//! ```

mod format;
mod messages;
mod spinner;

pub use format::{format_delta, format_duration, format_size, print_plan_summary, print_size_report};
pub use messages::{info, success, warning};
pub use spinner::Spinner;

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them; otherwise stderr
/// must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Resolve whether stderr output is colored.
///
/// `--no-color` always wins; otherwise [`should_use_color`] decides.
pub fn colors_enabled(no_color: bool) -> bool {
    !no_color && should_use_color()
}

/// Apply the color decision to `owo-colors` and `console`.
///
/// Every styled message goes through `if_supports_color`, which follows
/// the override set here.
pub fn init_colors(no_color: bool) {
    let enabled = colors_enabled(no_color);
    owo_colors::set_override(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Spinners are only drawn on an interactive terminal outside CI.
pub(crate) fn show_spinner() -> bool {
    !is_ci() && console::user_attended_stderr()
}
