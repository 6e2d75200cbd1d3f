//! Error types for catalog_sync

use std::fmt;

/// Unified error type for catalog_sync operations
#[derive(Debug)]
pub enum SyncError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// The API answered with `success: false`
    Api(Vec<String>),
    /// Failed to parse a JSON response
    Parse(serde_json::Error),
    /// Database operation failed
    Database(rusqlite::Error),
    /// A remote record could not be converted to a catalog entity
    InvalidRecord(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(e) => write!(f, "Network error: {}", e),
            SyncError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            SyncError::Api(errors) => write!(f, "API error: {}", errors.join("; ")),
            SyncError::Parse(e) => write!(f, "Parse error: {}", e),
            SyncError::Database(e) => write!(f, "Database error: {}", e),
            SyncError::InvalidRecord(detail) => write!(f, "Invalid record: {}", detail),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Network(e) => Some(e),
            SyncError::HttpStatus(_) => None,
            SyncError::Api(_) => None,
            SyncError::Parse(e) => Some(e),
            SyncError::Database(e) => Some(e),
            SyncError::InvalidRecord(_) => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Parse(err)
    }
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        SyncError::Database(err)
    }
}

/// Result alias for catalog_sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
