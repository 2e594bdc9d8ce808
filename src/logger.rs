//! Run logging: verbosity levels, a per-query progress bar, and the final
//! summary. Library modules log through `tracing`; this module owns the
//! subscriber setup and the user-facing progress output.

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::record::OutcomeKind;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum VerbosityLevel {
    Silent = 0,   // Only the progress bar and final summary
    Summary = 1,  // High-level run progress (default)
    Detailed = 2, // Per-query detail and warnings
    Debug = 3,    // Everything, including engine internals
}

impl VerbosityLevel {
    pub fn from_verbose_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Summary,
            1 => VerbosityLevel::Detailed,
            2.. => VerbosityLevel::Debug,
        }
    }
}

/// Install the tracing subscriber matching the requested verbosity.
/// RUST_LOG, when set, wins.
pub fn init_tracing(verbosity: VerbosityLevel) {
    let default_filter = match verbosity {
        VerbosityLevel::Silent => "error",
        VerbosityLevel::Summary => "warn",
        VerbosityLevel::Detailed => "info",
        VerbosityLevel::Debug => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Default)]
struct RunStats {
    started: Option<Instant>,
    found: usize,
    not_found: usize,
    invalid_input: usize,
    output_file: String,
}

pub struct RunLogger {
    verbosity: VerbosityLevel,
    progress: Mutex<Option<ProgressBar>>,
    stats: Mutex<RunStats>,
}

impl RunLogger {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        RunLogger {
            verbosity,
            progress: Mutex::new(None),
            stats: Mutex::new(RunStats::default()),
        }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Summary {
            self.print_message("INFO", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Detailed {
            self.print_message("WARN", message);
        }
    }

    /// Errors are always shown, regardless of verbosity.
    pub fn error(&self, message: &str) {
        self.print_message("ERROR", message);
    }

    /// Route through the progress bar when one is active, so log lines do
    /// not tear the bar's fixed positioning.
    fn print_message(&self, level: &str, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let line = format!("[{}] {}: {}", timestamp, level, message);

        let guard = self.progress.lock().unwrap();
        match guard.as_ref() {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }

    pub fn start_progress(&self, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        *self.progress.lock().unwrap() = Some(pb);
        self.stats.lock().unwrap().started = Some(Instant::now());
    }

    pub fn advance(&self, message: &str) {
        if let Some(pb) = self.progress.lock().unwrap().as_ref() {
            pb.inc(1);
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_progress(&self, final_message: &str) {
        if let Some(pb) = self.progress.lock().unwrap().take() {
            pb.finish_and_clear();
        }
        self.info(final_message);
    }

    pub fn record_outcome(&self, outcome: OutcomeKind) {
        let mut stats = self.stats.lock().unwrap();
        match outcome {
            OutcomeKind::Found => stats.found += 1,
            OutcomeKind::NotFound => stats.not_found += 1,
            OutcomeKind::InvalidInput => stats.invalid_input += 1,
        }
    }

    pub fn record_output_file(&self, path: &str) {
        self.stats.lock().unwrap().output_file = path.to_string();
    }

    /// Printed after the run regardless of verbosity.
    pub fn print_final_summary(&self) {
        let stats = self.stats.lock().unwrap();
        let total = stats.found + stats.not_found + stats.invalid_input;

        println!("\n=== LOOKUP SUMMARY ===");
        if let Some(started) = stats.started {
            println!("Run Duration: {:.2}s", started.elapsed().as_secs_f64());
        }
        println!("Queries Processed: {}", total);
        println!("Categorized: {}", stats.found);
        println!("Not Found: {}", stats.not_found);
        println!("Invalid Input: {}", stats.invalid_input);
        if !stats.output_file.is_empty() {
            println!("Results Exported: {}", stats.output_file);
        }
        println!("======================\n");
    }
}
