use thiserror::Error;

#[derive(Error, Debug)]
pub enum EolError {
    #[error("No input paths provided")]
    NoInput,

    #[error("Path not found: {0}")]
    TargetNotFound(String),

    #[error("Failed to read file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Truncated {width}-byte code unit at offset {offset}: {path}")]
    TruncatedUnit {
        path: String,
        offset: u64,
        width: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EolError>;
