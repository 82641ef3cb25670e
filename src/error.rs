use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UmsatzError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: invalid number in column {column}: {value:?}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, UmsatzError>;
