// src/error.rs

//! Error types for the cookbook library

use thiserror::Error;

/// Errors produced by the storage and aggregate layers
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("recipe 7".to_string());
        assert_eq!(err.to_string(), "recipe 7 not found");

        let err = Error::InvalidInput("name: may not be blank".to_string());
        assert_eq!(err.to_string(), "Invalid input: name: may not be blank");
    }

    #[test]
    fn test_from_rusqlite() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Database(_)));
    }
}
