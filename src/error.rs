// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for presto
//!
//! Transport failures never show up here: the executor folds them into a
//! [`ResponseRecord`](crate::http::ResponseRecord). What remains are input
//! validation, persistence and export errors.

use thiserror::Error;

/// Result type alias for presto operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for presto
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client could not be built or a request could not be assembled
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request body is not well-formed JSON
    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Unsupported HTTP method name
    #[error("Unsupported HTTP method: {0}")]
    Method(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// No preset with the given identifier
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    /// PDF generation error
    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid-body error
    pub fn invalid_json(err: serde_json::Error) -> Self {
        Error::InvalidJson(err)
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a preset-not-found error
    pub fn preset_not_found(id: impl Into<String>) -> Self {
        Error::PresetNotFound(id.into())
    }

    /// Create a PDF generation error
    pub fn pdf<S: Into<String>>(msg: S) -> Self {
        Error::PdfGeneration(msg.into())
    }

    /// Check if this error was raised before anything was sent or written
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidJson(_) | Error::Method(_) | Error::Url(_)
        )
    }

    /// Check if this is a persistence error
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::Storage(inner) => Error::Storage(format!("{}: {}", msg, inner)),
                Error::Io(e) => Error::Storage(format!("{}: {}", msg, e)),
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}
