use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner shown while the server starts and bundles are produced.
///
/// Hidden when stderr is not a terminal and on CI.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        if super::is_ci() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Stop with a green check mark.
    pub fn finish(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✓".green(), message));
    }

    /// Stop with a red cross.
    pub fn fail(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✗".red(), message));
    }
}
