use thiserror::Error;

use crate::models::FailureKind;
use crate::stats::StatsError;

/// Crate-wide error for CLI, configuration, and server plumbing.
#[derive(Debug, Error)]
pub enum VantageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of one boundary query: a provider API call, or the external
/// bucket-statistics command. Always local to the unit that issued the
/// query — collectors convert these into `PartialFailure` records instead
/// of propagating them upward.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{operation} failed: {message}")]
    Api { operation: String, message: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl SourceError {
    pub fn api(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        SourceError::Api {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    /// Classification used for the report's partial-failures list.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SourceError::Stats(_) => FailureKind::BucketStatsUnavailable,
            _ => FailureKind::SourceUnavailable,
        }
    }
}
