//! `log` backend that cooperates with progress bars
//!
//! While bars are on screen, records are printed through
//! [`MultiProgress::println`] so they appear above the bars instead of
//! tearing them. Without bars, records go straight to stderr.

use indicatif::MultiProgress;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Logger writing `level: message` lines to stderr or through progress bars
pub struct ProgressLogger {
    level: LevelFilter,
    progress: Option<MultiProgress>,
}

impl ProgressLogger {
    /// Create a logger accepting records up to `level`
    pub const fn new(level: LevelFilter, progress: Option<MultiProgress>) -> Self {
        Self { level, progress }
    }

    /// Format a record as a single output line
    pub fn format(record: &Record<'_>) -> String {
        let level = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        format!("{level}: {}", record.args())
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    // Allow print for log output when no progress display is active
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        match &self.progress {
            Some(progress) if !progress.is_hidden() && progress.println(&line).is_ok() => {}
            _ => eprintln!("{line}"),
        }
    }

    fn flush(&self) {}
}

/// Level filter for the command-line verbosity flags
pub const fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the process-wide logger
///
/// Returns `false` when a logger was already installed, in which case the
/// existing one is kept.
pub fn init(level: LevelFilter, progress: Option<MultiProgress>) -> bool {
    let installed = log::set_boxed_logger(Box::new(ProgressLogger::new(level, progress))).is_ok();
    if installed {
        log::set_max_level(level);
    }
    installed
}
