//! Error types
//!
//! `ApiError` is the top-level error surfaced by CLI commands and the session.
//! Each subsystem has its own error enum that converts into it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for deptree operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Errors reading, parsing, or writing a snapshot document
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No snapshot found at {0}")]
    NotFound(PathBuf),

    #[error("Snapshot is {depth} levels deep; at most {limit} can be stored")]
    TooDeep { depth: usize, limit: usize },
}

/// Errors raised while flattening a dependency graph into a tree
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "Dependency cycle detected in {project} [{framework}]: {}",
        chain.join(" -> ")
    )]
    CycleDetected {
        project: String,
        framework: String,
        chain: Vec<String>,
    },

    #[error("Dependency chain in {project} [{framework}] exceeds {limit} tree levels")]
    TooDeep {
        project: String,
        framework: String,
        limit: usize,
    },
}

/// Errors acquiring a dependency graph or lock data from the build system
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {output}")]
    CommandFailed {
        program: String,
        status: String,
        output: String,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {kind} document {path}: {source}")]
    Parse {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
