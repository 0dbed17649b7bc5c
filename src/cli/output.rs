//! CLI output formatting utilities.

use crate::batch::{ResultsView, COMPLETION_NOTICE};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Create the percent bar driven by the shared status slot.
    pub fn progress_bar() -> ProgressBar {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Prints the batch summary once every download has ended.
pub struct CliResultsView {
    bar: Option<ProgressBar>,
}

impl CliResultsView {
    /// `bar` is finished before the results are printed.
    pub fn new(bar: Option<ProgressBar>) -> Self {
        Self { bar }
    }
}

impl ResultsView for CliResultsView {
    fn render(&self, lines: &[String]) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }

        Output::header("Resultados do Download:");
        for line in lines {
            println!("{}", line);
        }
    }

    fn notify_complete(&self) {
        println!();
        Output::success(COMPLETION_NOTICE);
    }
}
