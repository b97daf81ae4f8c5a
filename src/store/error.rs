//! Record store error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Date argument is strictly after the current time
    #[error("date entry cannot be in the future: {0}")]
    DateInFuture(chrono::NaiveDate),

    /// Zero/unset or future date handed to the offset index
    #[error("index: date cannot be from the future or unset")]
    InvalidDate,

    /// Hour outside [0, 23]
    #[error("invalid hour: {0} (must be 0-23)")]
    InvalidHour(u8),

    /// No record exists for the requested date
    #[error("no entry found for {0}")]
    NotFound(chrono::NaiveDate),

    /// Malformed date prefix or field content (file corruption)
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Lock acquisition failed (poisoned by a panicking writer)
    #[error("lock error: {0}")]
    Lock(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_error_display() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let err = StoreError::NotFound(date);
        assert_eq!(err.to_string(), "no entry found for 2025-01-21");

        let err = StoreError::InvalidHour(24);
        assert_eq!(err.to_string(), "invalid hour: 24 (must be 0-23)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
