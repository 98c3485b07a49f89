// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::dag::AnalysisError;
use crate::project::ValidationError;

#[derive(Error, Debug)]
pub enum PertError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid activity #{index} in project file: {source}")]
    InvalidActivity {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PertError>;
