use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Where log lines and download progress go.
///
/// Passed down through the [`Fetcher`](crate::utils::download::Fetcher) instead of
/// living in a global so that tests can swap in a recorder.
pub trait Reporter {
    fn log(&self, message: &str);

    /// A progress bar for a body of `total` bytes (unknown if `None`).
    fn progress(&self, _total: Option<u64>) -> ProgressBar {
        ProgressBar::hidden()
    }
}

/// Terminal reporter. Silent unless `--verbose` was given.
pub struct Console {
    verbose: bool,
}

impl Console {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for Console {
    fn log(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "[VERBOSE]".blue(), message);
        }
    }

    fn progress(&self, total: Option<u64>) -> ProgressBar {
        if !self.verbose {
            return ProgressBar::hidden();
        }

        let Some(total) = total else {
            return ProgressBar::new_spinner();
        };

        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
