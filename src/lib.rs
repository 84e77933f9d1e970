pub mod classify;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod reporter;
pub mod rewrite;
pub mod run;

pub use classify::{Classification, FileReport, FileStatus, classify};
pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use discovery::{DirectoryWalker, WalkConfig};
pub use encoding::Encoding;
pub use engine::{ConvertEngine, ConvertEvent, ConvertOptions, RunSummary};
pub use error::{EolError, Result};
pub use reporter::{Reporter, RunResult, json::JsonReporter, terminal::TerminalReporter};
pub use rewrite::{RewriteOutcome, rewrite};
