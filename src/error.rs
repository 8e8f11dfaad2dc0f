// src/error.rs

//! Error types for the Cloudsmith client library

use crate::failure::FailureReport;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the API client, configuration loading and rendering
#[derive(Error, Debug)]
pub enum Error {
    /// The remote service answered with a non-success status
    #[error("{0}")]
    Api(Box<FailureReport>),

    /// A failure was already reported and the command should exit with this code
    #[error("command failed with exit status {0}")]
    Exit(i32),

    /// The request never produced a response (connection, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Configuration file or option error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while producing structured output
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The failure report, if this is an API failure
    pub fn as_failure(&self) -> Option<&FailureReport> {
        match self {
            Error::Api(report) => Some(report),
            _ => None,
        }
    }
}

impl From<FailureReport> for Error {
    fn from(report: FailureReport) -> Self {
        Error::Api(Box::new(report))
    }
}
