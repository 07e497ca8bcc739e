//! Harness error type, aggregating everything a subcommand can fail with.

use thiserror::Error;

use storebench_core::CoreError;
use storebench_mongo::DocError;
use storebench_pg::StoreError;

use crate::config::ConfigError;

/// Top-level harness errors. Any of these aborts the subcommand with a
/// non-zero exit.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Core(#[from] CoreError),

    #[error("relational store error: {0}")]
    Relational(#[from] StoreError),

    #[error("document store error: {0}")]
    Document(#[from] DocError),

    #[error("cross-store verification failed: {0}")]
    Verification(String),

    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for harness subcommands.
pub type HarnessResult<T> = Result<T, HarnessError>;
