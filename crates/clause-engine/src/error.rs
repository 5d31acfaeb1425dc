use std::path::PathBuf;

use thiserror::Error;

/// Why the external clause catalog could not be used
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Clause catalog not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read clause catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clause catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Clause catalog defines no clauses in any recognised category")]
    Empty,
}

/// Unexpected failure while tracing clauses against a document
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TraceError {
    #[error("Clause '{0}' has no keywords")]
    NoKeywords(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Match threshold must be an integer between 0 and 100 (got: {0})")]
    InvalidThreshold(String),
}
