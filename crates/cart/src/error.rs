//! Error types for cart collaborators.
//!
//! The store boundary absorbs all of these: a failed lookup or write never
//! propagates to the caller as an error, only as a notification plus an
//! unchanged cart. The types stay distinct so tests and logs can tell the
//! failure modes apart.

use thiserror::Error;

/// Errors from the inventory or catalog collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed (transport, status, or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service has no record for the requested product.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request URL could not be built from the configured base.
    #[error("Invalid request URL: {0}")]
    Url(String),
}

/// Errors from the durable cart storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted snapshot could not be decoded.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn test_storage_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::from(io);
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
    }
}
