use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while resolving configuration, before any case runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REACT_APP_BACKEND_URL not found in environment variables")]
    MissingBaseUrl,
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to read env file {}: {reason}", path.display())]
    EnvFile { path: PathBuf, reason: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Why a single case failed. Never escapes the case that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("connection error: {0}")]
    Transport(String),
    #[error("request timed out after {0} ms")]
    Timeout(u128),
    #[error("HTTP {actual} (expected {expected})")]
    UnexpectedStatus { expected: String, actual: u16 },
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("unexpected response format: {0}")]
    UnexpectedShape(String),
    #[error("record {index} is missing fields: {}", fields.join(", "))]
    MissingFields { index: usize, fields: Vec<String> },
}
