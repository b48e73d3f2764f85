// src/progress.rs
//! Byte progress bars using indicatif

use colored::{Color, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{msg}: {percent:>3}%|{bar:40.cyan/blue}| {bytes}/{total_bytes} [{elapsed}<{eta}]";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}: {bytes} [{elapsed}, {bytes_per_sec}]";

/// Progress of a single transfer
pub struct TransferProgress {
    bar: Option<ProgressBar>,
}

impl TransferProgress {
    /// Create a progress bar for a transfer of `total` bytes.
    ///
    /// An unknown total falls back to a spinner that only counts bytes.
    pub fn new(enabled: bool, label: &str, color: Option<Color>, total: Option<u64>) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = match total {
            Some(len) if len > 0 => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(BAR_TEMPLATE)
                        .expect("Invalid template")
                        .progress_chars("█▉▊▋▌▍▎▏ "),
                );
                bar
            }
            _ => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template(SPINNER_TEMPLATE)
                        .expect("Invalid template")
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };

        let message = match color {
            Some(color) => label.color(color).to_string(),
            None => label.to_string(),
        };
        bar.set_message(message);

        Self { bar: Some(bar) }
    }

    /// Record `bytes` more bytes written
    pub fn advance(&self, bytes: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(bytes);
        }
    }

    /// Bytes recorded so far (0 when disabled)
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map(|bar| bar.position()).unwrap_or(0)
    }

    /// Leave the finished bar on screen
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish();
        }
    }

    /// Remove the bar after a failed transfer
    pub fn abandon(&self) {
        if let Some(ref bar) = self.bar {
            bar.abandon();
        }
    }

    /// Check if the progress bar is drawn
    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }
}
