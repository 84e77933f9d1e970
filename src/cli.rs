use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "eolfix",
    version,
    about = "Convert Windows (CRLF) line endings to Unix (LF)",
    long_about = "eolfix scans files for Windows-style CRLF line endings and rewrites them \
to Unix-style LF, preserving byte-order marks and all other bytes. Binary files are \
detected by content and skipped."
)]
pub struct Cli {
    /// Paths to process (files or directories)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report files that need conversion without modifying anything
    #[arg(short, long)]
    pub check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Only process files with these extensions (repeatable)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Process every file, not just known text types
    #[arg(short, long)]
    pub all: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Maximum directory depth to traverse
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Number of worker threads
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Verbose output (list every file, not just changed ones)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress per-file output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_basic_args() {
        let cli = Cli::try_parse_from(["eolfix", "./src/"]).unwrap();
        assert_eq!(cli.paths.len(), 1);
        assert!(!cli.check);
        assert!(!cli.all);
    }

    #[test]
    fn test_requires_at_least_one_path() {
        assert!(Cli::try_parse_from(["eolfix"]).is_err());
    }

    #[test]
    fn test_parse_multiple_paths() {
        let cli = Cli::try_parse_from(["eolfix", "a.txt", "b.txt", "dir/"]).unwrap();
        assert_eq!(cli.paths.len(), 3);
    }

    #[test]
    fn test_parse_check_mode() {
        let cli = Cli::try_parse_from(["eolfix", "--check", "."]).unwrap();
        assert!(cli.check);
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["eolfix", "--format", "json", "."]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_repeated_extensions() {
        let cli = Cli::try_parse_from(["eolfix", "--ext", "md", "--ext", "rs", "."]).unwrap();
        assert_eq!(cli.extensions, vec!["md", "rs"]);
    }

    #[test]
    fn test_parse_threads() {
        let cli = Cli::try_parse_from(["eolfix", "-j", "4", "."]).unwrap();
        assert_eq!(cli.threads, Some(4));
    }

    #[test]
    fn test_parse_walk_options() {
        let cli =
            Cli::try_parse_from(["eolfix", "--follow-symlinks", "--max-depth", "2", "."]).unwrap();
        assert!(cli.follow_symlinks);
        assert_eq!(cli.max_depth, Some(2));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["eolfix", "-q", "-v", "."]).is_err());
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["eolfix", "."]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Terminal));
        assert!(!cli.check);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.threads.is_none());
        assert!(cli.max_depth.is_none());
    }
}
