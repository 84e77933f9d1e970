use crate::reporter::{Reporter, RunResult};

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, result: &RunResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize result: {}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FileReport, FileStatus};
    use crate::engine::RunSummary;
    use std::path::PathBuf;

    fn sample_result() -> RunResult {
        let files = vec![
            FileReport {
                path: PathBuf::from("a.txt"),
                status: FileStatus::Bad,
                message: "converted 1 CRLF pair to LF".to_string(),
            },
            FileReport {
                path: PathBuf::from("b.txt"),
                status: FileStatus::Good,
                message: "already uses LF line endings".to_string(),
            },
        ];
        RunResult {
            version: "0.3.0".to_string(),
            scanned_at: "2026-08-07T12:00:00+00:00".to_string(),
            targets: vec!["./src".to_string()],
            check_only: false,
            summary: RunSummary::from_reports(&files),
            files,
        }
    }

    #[test]
    fn test_json_output_structure() {
        let output = JsonReporter::new().report(&sample_result());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["version"], "0.3.0");
        assert_eq!(parsed["targets"][0], "./src");
        assert_eq!(parsed["summary"]["total"], 2);
        assert_eq!(parsed["summary"]["bad"], 1);
        assert_eq!(parsed["files"][0]["status"], "bad");
        assert_eq!(parsed["files"][1]["status"], "good");
    }

    #[test]
    fn test_json_statuses_are_lowercase_strings() {
        let output = JsonReporter::new().report(&sample_result());
        assert!(output.contains("\"status\": \"bad\""));
        assert!(output.contains("\"status\": \"good\""));
    }

    #[test]
    #[allow(clippy::default_constructed_unit_structs)]
    fn test_json_default_trait() {
        let output = JsonReporter::default().report(&sample_result());
        assert!(output.contains("\"total\": 2"));
    }
}
