pub mod json;
pub mod terminal;

use crate::classify::FileReport;
use crate::engine::RunSummary;
use serde::Serialize;

/// Complete result of one run, as handed to reporters.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub version: String,
    pub scanned_at: String,
    pub targets: Vec<String>,
    pub check_only: bool,
    pub summary: RunSummary,
    pub files: Vec<FileReport>,
}

pub trait Reporter {
    fn report(&self, result: &RunResult) -> String;
}
