//! Spinner for steps without a known duration.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream::Stderr};
use std::time::Duration;

/// Spinner on stderr; hidden when not attached to a terminal or in CI.
///
/// # Examples
///
/// ```no_run
/// use sheaf_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Loading config...");
/// spinner.clear();
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if super::show_spinner() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Finish with a red cross.
    pub fn fail(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            "✗".if_supports_color(Stderr, |t| t.red()),
            message
        ));
    }

    /// Remove the spinner line without a final message.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}
