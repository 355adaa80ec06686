use std::path::PathBuf;

use thiserror::Error;

/// Failures that can happen while setting the game up. Gameplay itself never errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid word bank json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word bank {} has no phrases", .0.display())]
    EmptyWordBank(PathBuf),
    #[error("built-in word bank `{0}` is missing")]
    MissingBuiltin(String),
}

pub type Result<T> = std::result::Result<T, Error>;
