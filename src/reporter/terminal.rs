use crate::classify::FileStatus;
use crate::reporter::{Reporter, RunResult};
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
    quiet: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn status_label(&self, status: FileStatus) -> colored::ColoredString {
        match status {
            FileStatus::Good => "  ok  ".green(),
            FileStatus::Bad => " fix  ".yellow().bold(),
            FileStatus::Binary => " bin  ".cyan(),
            FileStatus::Error => " err  ".red().bold(),
        }
    }

    /// Whether a file line is worth printing at the current verbosity.
    fn shows(&self, status: FileStatus) -> bool {
        if self.quiet {
            return false;
        }
        if self.verbose {
            return true;
        }
        !matches!(status, FileStatus::Good)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, result: &RunResult) -> String {
        let mut output = String::new();

        for file in &result.files {
            if !self.shows(file.status) {
                continue;
            }
            output.push_str(&format!(
                "[{}] {} - {}\n",
                self.status_label(file.status),
                file.path.display(),
                file.message
            ));
        }

        let summary = &result.summary;
        let headline = if summary.bad == 0 {
            "All files use LF line endings".green().bold().to_string()
        } else if result.check_only {
            format!("{} file(s) need conversion", summary.bad)
                .yellow()
                .bold()
                .to_string()
        } else {
            format!("Converted {} file(s)", summary.bad)
                .green()
                .bold()
                .to_string()
        };

        output.push_str(&format!(
            "\n{}\n{} scanned, {} clean, {} converted, {} binary skipped, {} errors\n",
            headline, summary.total, summary.good, summary.bad, summary.binary, summary.errors
        ));

        output
    }
}
