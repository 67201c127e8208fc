//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Handler registry errors
///
/// `Scan` is the only variant that is fatal at startup; a per-file `Load`
/// failure skips that file and leaves the rest of the set intact.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read handler directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load handler {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("handler '{0}' already registered")]
    Duplicate(String),

    #[error("registry internal error: {0}")]
    Internal(String),
}

/// Errors raised by a handler's entry point during invocation
///
/// These never propagate past the dispatch boundary; the dispatcher logs
/// them and treats the handler as not having handled the message.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),

    #[error("platform call failed: {0}")]
    Bot(#[from] BotError),
}

impl HandlerError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
