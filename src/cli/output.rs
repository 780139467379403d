//! Output formatting and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::orchestrator::{BatchReport, RunOutcome};
use crate::core::progress::{format_bytes, Progress};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";

/// Status lines and the transfer progress bar
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl OutputFormatter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: Mutex::new(None),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    fn new_progress_bar(total_size: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let progress_bar = ProgressBar::new(total_size);
        progress_bar.set_style(style);
        progress_bar.set_message("Downloading...");
        progress_bar
    }

    /// Advance the progress bar, starting one for a new transfer and
    /// clearing it once the transfer is complete
    pub fn update_progress(&self, progress: &Progress) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }
        let Ok(mut slot) = self.progress_bar.lock() else {
            return;
        };

        let bar = slot.get_or_insert_with(|| Self::new_progress_bar(progress.total_size));
        bar.set_length(progress.total_size);
        bar.set_position(progress.downloaded_size);
        if let Some(speed) = progress.speed {
            bar.set_message(format!("{}/s", format_bytes(speed as u64)));
        }

        if progress.is_complete() {
            bar.finish_and_clear();
            *slot = None;
        }
    }

    /// Drop a bar left behind by a failed transfer
    pub fn abandon_progress(&self) {
        if let Ok(mut slot) = self.progress_bar.lock() {
            if let Some(bar) = slot.take() {
                bar.abandon();
            }
        }
    }

    /// Whether a transfer bar is currently on screen
    pub fn has_progress_bar(&self) -> bool {
        self.progress_bar.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "✔".green(), message);
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Print the per-item summary of a batch run
    pub fn print_batch_report(&self, report: &BatchReport) {
        if report.is_clean() {
            self.success(&report.to_string());
            return;
        }

        self.warning(&report.to_string());
        for (reference, reason) in report.failures() {
            eprintln!("  {} {}: {}", "✘".red(), reference, reason);
        }
    }

    /// Print the result of a finished run
    pub fn print_outcome(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Downloaded(path) => {
                self.success(&format!("Saved to {}", path.display()))
            }
            RunOutcome::Batch(report) => self.print_batch_report(report),
            RunOutcome::Described(path) => {
                self.success(&format!("Description appended to {}", path.display()))
            }
            RunOutcome::Skipped(reason) => self.warning(reason),
        }
    }
}

/// Create a progress callback for transfers
pub fn create_progress_callback(
    formatter: Arc<OutputFormatter>,
) -> impl Fn(Progress) + Send + Sync + 'static {
    move |progress: Progress| {
        formatter.update_progress(&progress);
    }
}
