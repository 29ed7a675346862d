//! Spinner display for long-running probes

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the host is being inspected
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Remove the spinner without leaving a line behind
    pub fn finish_and_clear(self) {
        self.pb.finish_and_clear();
    }
}
