use std::fmt;

use thiserror::Error;

/// Everything that can stop a batch. All of these are fatal.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not find {path}")]
    SourceNotFound { path: String },

    #[error("malformed feature record near [{line}]: {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("problem finding one of the genes {start} {stop} in {path}")]
    IdentifierNotFound {
        start: String,
        stop: String,
        path: String,
    },

    #[error("{line} in {path} has {found} fields instead of 4, please fix")]
    DescriptorFieldCountMismatch {
        line: String,
        path: String,
        found: usize,
    },

    #[error("no separator (comma, semicolon or tab) in [{line}] of {path}")]
    MissingSeparator { line: String, path: String },

    #[error("invalid coordinate [{text}]")]
    InvalidCoordinate { text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PlotError {
    pub fn malformed(line: &str, reason: impl fmt::Display) -> Self {
        Self::MalformedRecord { line: line.trim().to_string(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
