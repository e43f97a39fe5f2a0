use crate::database::DatabaseError;
use crate::introspect::Error as IntrospectError;
use std::io;
use thiserror::Error;

/// Unified error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("introspection error: {0}")]
    Introspect(#[from] IntrospectError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
