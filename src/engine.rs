//! The classify-then-rewrite engine.
//!
//! One engine drives both public views: `run` processes a file list and
//! returns the reports in input order, `stream` emits per-file events over a
//! channel as files resolve. Files are independent, so they are fanned out
//! across a rayon pool; within one file all reads stay sequential, and a
//! rewrite only starts after that file's own classification finished.

use crate::classify::{FileReport, FileStatus, classify};
use crate::rewrite::rewrite;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::thread;
use tracing::warn;

/// Engine options.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Classify only; never modify a file.
    pub check_only: bool,
    /// Explicit worker count. None uses the default rayon pool.
    pub threads: Option<usize>,
}

/// Aggregate counts over one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub good: usize,
    pub bad: usize,
    pub binary: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = RunSummary {
            total: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report.status {
                FileStatus::Good => summary.good += 1,
                FileStatus::Bad => summary.bad += 1,
                FileStatus::Binary => summary.binary += 1,
                FileStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// True when no file needed (or still needs) conversion.
    pub fn is_clean(&self) -> bool {
        self.bad == 0
    }
}

/// Per-file event emitted by the streaming view.
#[derive(Debug, Clone)]
pub enum ConvertEvent {
    /// One file finished processing.
    File(FileReport),
    /// The whole batch finished.
    Done(RunSummary),
}

/// One classify-then-rewrite engine over a list of files.
#[derive(Debug, Clone, Default)]
pub struct ConvertEngine {
    options: ConvertOptions,
}

impl ConvertEngine {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Process one file: classify, and rewrite when conversion is needed.
    ///
    /// Every failure mode is folded into the report; this never panics and
    /// never aborts sibling files.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let classification = classify(path);

        let message = match classification.status {
            FileStatus::Bad if !self.options.check_only => match rewrite(path) {
                Ok(outcome) => format!(
                    "converted {} CRLF pair{} to LF",
                    outcome.pairs_collapsed,
                    if outcome.pairs_collapsed == 1 { "" } else { "s" }
                ),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Rewrite failed");
                    format!("conversion failed: {}", e)
                }
            },
            _ => classification.message,
        };

        FileReport {
            path: path.to_path_buf(),
            status: classification.status,
            message,
        }
    }

    /// Batch view: process every file, returning reports in input order.
    pub fn run(&self, files: &[PathBuf]) -> Vec<FileReport> {
        self.install(|| {
            files
                .par_iter()
                .map(|path| self.process_file(path))
                .collect()
        })
    }

    /// Streaming view: per-file events in resolution order, then a terminal
    /// `Done` carrying the summary.
    ///
    /// The receiver iterates until the batch completes; dropping it early
    /// just discards remaining events without interrupting processing.
    pub fn stream(self, files: Vec<PathBuf>) -> Receiver<ConvertEvent> {
        let (tx, rx) = channel();

        thread::spawn(move || {
            let file_tx = tx.clone();
            let reports: Vec<FileReport> = self.install(|| {
                files
                    .par_iter()
                    .map_with(file_tx, |tx, path| {
                        let report = self.process_file(path);
                        let _ = tx.send(ConvertEvent::File(report.clone()));
                        report
                    })
                    .collect()
            });

            let _ = tx.send(ConvertEvent::Done(RunSummary::from_reports(&reports)));
        });

        rx
    }

    fn install<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match self.options.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
            {
                Ok(pool) => pool.install(op),
                Err(e) => {
                    warn!(error = %e, "Failed to build worker pool, using default");
                    op()
                }
            },
            None => op(),
        }
    }
}
