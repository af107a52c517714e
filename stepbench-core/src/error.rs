use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while running an optimization harness.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("shape mismatch: objective expects {expected} parameters, state has {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("objective is not differentiable here: {reason}")]
    NonDifferentiable { reason: String },

    #[error("parameter {index} became non-finite after an update")]
    Diverged { index: usize },

    #[error("backward pass requested without a preceding forward pass")]
    MissingForward,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    FileFormat(#[from] FileFormatError),
}

/// Errors raised while reading or writing numeric tables.
#[derive(Error, Debug)]
pub enum FileFormatError {
    #[error("cannot access table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: cannot parse {token:?} as a number")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        token: String,
    },

    #[error("table {path} contains no rows")]
    Empty { path: PathBuf },

    #[error("table of shape {rows}x{cols} is not a vector")]
    NotAVector { rows: usize, cols: usize },

    #[error("design matrix has {rows} rows but the label vector has {labels} entries")]
    RowCountMismatch { rows: usize, labels: usize },
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;
