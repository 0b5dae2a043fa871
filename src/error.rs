use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("invalid ticker symbol '{0}'")]
    InvalidTicker(String),

    #[error("failed to launch agent CLI '{}': {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("agent CLI exited with {status} before producing a result: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("agent stream ended without a result message")]
    MissingResult,

    #[error("malformed message from agent CLI: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResearchError>;
