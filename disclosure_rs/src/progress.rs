//! Progress UI utilities (spinners, status messages)
//!
//! The uploading state shows a spinner whose caption cycles through
//! [`LOADING_STAGES`] every [`CAPTION_PERIOD`]. Purely cosmetic: nothing
//! waits on it.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Captions shown while a request is in flight.
pub const LOADING_STAGES: &[&str] = &[
    "Booting up the audit engines... fetching your disclosure",
    "Scanning every line item, no fee left behind",
    "Decoding legalese into plain English",
    "Benchmarking your costs against real-world data",
    "Looking for outliers, hidden fees, and creative math",
    "Cross-verifying lender inputs",
    "Polishing your results",
    "Almost there...",
];

pub const CAPTION_PERIOD: Duration = Duration::from_secs(8);

/// Caption for a given elapsed time; wraps around after the last stage.
pub fn caption_at<'a>(stages: &[&'a str], elapsed: Duration, period: Duration) -> &'a str {
    if stages.is_empty() || period.is_zero() {
        return "";
    }
    let step = (elapsed.as_nanos() / period.as_nanos()) as usize;
    stages[step % stages.len()]
}

/// Spinner for long-running operations
pub struct Spinner {
    bar: ProgressBar,
    rotation: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Create a new spinner with a message
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .expect("valid template"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self {
            bar,
            rotation: None,
        }
    }

    /// Spinner whose caption rotates through `stages` on a timer.
    /// Must be called inside a Tokio runtime.
    pub fn with_captions(stages: &'static [&'static str], period: Duration) -> Self {
        let mut spinner = Self::new(caption_at(stages, Duration::ZERO, period));
        let bar = spinner.bar.clone();
        spinner.rotation = Some(tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let mut ticker = tokio::time::interval(period);
            // First tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                bar.set_message(caption_at(stages, started.elapsed(), period).to_string());
            }
        }));
        spinner
    }

    /// Hidden spinner, for JSON output and non-interactive runs.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            rotation: None,
        }
    }

    fn stop(&self) {
        if let Some(task) = &self.rotation {
            task.abort();
        }
        self.bar.finish_and_clear();
    }

    /// Finish with success message (green checkmark)
    pub fn finish_success(&self, message: &str) {
        self.stop();
        if !self.bar.is_hidden() {
            eprintln!("{} {}", style("✓").green().bold(), message);
        }
    }

    /// Just clear the spinner without message
    pub fn finish_clear(&self) {
        self.stop();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(task) = self.rotation.take() {
            task.abort();
        }
    }
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Format duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format a count with proper singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
