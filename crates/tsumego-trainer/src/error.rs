//! Trainer error types

use sgf_core::SgfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Problem collection is empty")]
    EmptyCollection,

    #[error("Problem not found: {0}")]
    ProblemNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid collection pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Collection path error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Sgf(#[from] SgfError),
}
