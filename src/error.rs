//! Error types

use crate::types::Identifier;
use thiserror::Error;

/// Errors raised while building or querying a [`crate::store::TreeStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Parent with id \"{parent}\" for element with id \"{id}\" not found")]
    ParentNotFound { parent: Identifier, id: Identifier },

    #[error("Element with id \"{id}\" not found")]
    NotFound { id: Identifier },

    #[error("Duplicate element id \"{id}\"")]
    DuplicateId { id: Identifier },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the tooling layer (config, logging, CLI)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
