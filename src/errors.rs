/*!
 * Error types for the podpost application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when normalizing episode identifiers
#[derive(Error, Debug)]
pub enum IdentifierError {
    /// Error when a token matches none of the recognized shapes
    #[error("invalid episode identifier: {0}")]
    InvalidIdentifier(String),
}

/// Errors that can occur when reading marker tables
#[derive(Error, Debug)]
pub enum MarkerError {
    /// Error when a timestamp string cannot be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Error when the marker table is missing a required column
    #[error("marker table is missing column '{0}'")]
    MissingColumn(String),

    /// Error when a row has fewer fields than the header
    #[error("marker row {row} is truncated: {line}")]
    TruncatedRow {
        /// 1-based row number (excluding header)
        row: usize,
        /// The offending line
        line: String,
    },

    /// Error when the marker file is missing or unreadable
    #[error("marker file not found: {0}")]
    FileNotFound(PathBuf),

    /// Error when the table has no header or no rows
    #[error("marker table is empty: {0}")]
    EmptyTable(PathBuf),
}

/// Errors that can occur when writing chapter tags
#[derive(Error, Debug)]
pub enum TagError {
    /// Error when the target audio file does not exist
    #[error("audio file not found: {0}")]
    AudioFileNotFound(PathBuf),

    /// Error from the underlying ID3 tag container
    #[error("tag container error: {0}")]
    Container(#[from] id3::Error),
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Error when the response contains no usable payload
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from identifier normalization
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Error from marker table processing
    #[error("Marker error: {0}")]
    Marker(#[from] MarkerError),

    /// Error from chapter tag writing
    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
