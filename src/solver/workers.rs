//! Worker pool and progress reporting for batch computations
//!
//! Every expensive batch (compendium build, histogram, ranking) runs inside a
//! dedicated rayon pool sized from `WorkerConfig`. A panic inside a worker is
//! caught at the pool boundary and surfaces as `Error::ComputeFailure`, so a
//! batch either completes entirely or fails entirely.

use crate::error::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Threading and reporting options for batch work
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerConfig {
    /// Requested worker count; 0 means "all hardware threads"
    pub threads: usize,
    /// Draw progress bars and status lines on stderr
    pub show_progress: bool,
}

impl WorkerConfig {
    #[must_use]
    pub const fn new(threads: usize) -> Self {
        Self {
            threads,
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Effective worker count, clamped to `1..=available_parallelism`
    #[must_use]
    pub fn worker_count(&self) -> usize {
        let hardware = thread::available_parallelism().map_or(1, NonZeroUsize::get);

        if self.threads == 0 || self.threads > hardware {
            hardware
        } else {
            self.threads
        }
    }

    /// Run `job` inside a rayon pool of `worker_count()` threads
    ///
    /// # Errors
    /// Returns `Error::ComputeFailure` if the pool cannot be built or any
    /// worker panics.
    pub fn run<T, F>(&self, job: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count())
            .build()
            .map_err(|e| Error::ComputeFailure(e.to_string()))?;

        panic::catch_unwind(AssertUnwindSafe(|| pool.install(job)))
            .map_err(|payload| Error::ComputeFailure(panic_message(payload.as_ref())))
    }

    /// Progress bar for `len` steps, hidden unless progress is enabled
    #[must_use]
    pub fn progress_bar(&self, len: u64, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {elapsed}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb.set_message(message);
        pb
    }

    /// Print a status line on stderr
    pub fn status(&self, message: &str) {
        if self.show_progress {
            eprintln!("{} {message}", "›".cyan().bold());
        }
    }

    /// Print a warning on stderr; warnings never replace an error return
    pub fn warn(&self, message: &str) {
        if self.show_progress {
            eprintln!("{} {message}", "⚠".yellow().bold());
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn worker_count_defaults_to_hardware() {
        let hardware = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        assert_eq!(WorkerConfig::new(0).worker_count(), hardware);
        assert_eq!(WorkerConfig::new(usize::MAX).worker_count(), hardware);
        assert_eq!(WorkerConfig::new(1).worker_count(), 1);
    }

    #[test]
    fn run_returns_job_result() {
        let sum = WorkerConfig::new(2)
            .run(|| (1..=100u64).into_par_iter().sum::<u64>())
            .unwrap();
        assert_eq!(sum, 5050);
    }

    #[test]
    fn run_turns_worker_panic_into_error() {
        let result = WorkerConfig::new(2).run(|| {
            (0..64u32)
                .into_par_iter()
                .map(|i| {
                    assert!(i != 42, "boom at {i}");
                    i
                })
                .sum::<u32>()
        });

        match result {
            Err(Error::ComputeFailure(message)) => assert!(message.contains("boom")),
            other => panic!("expected ComputeFailure, got {other:?}"),
        }
    }
}
