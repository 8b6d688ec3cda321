//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain name not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Domain name already tracked
    #[error("Domain already exists: {0}")]
    DomainExists(String),

    /// Booking not found
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The user is not allowed to perform the action
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The domain is not in a state that allows the requested transition
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// An external call exceeded its time budget
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Bulk import row could not be coerced into a domain record
    #[error("Import error at row {row} ({domain}): {reason}")]
    ImportError {
        row: usize,
        domain: String,
        reason: String,
    },
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::DomainExists(_)
            | Self::BookingNotFound(_)
            | Self::ValidationError(_)
            | Self::NotAuthorized(_)
            | Self::InvalidState(_)
            | Self::ImportError { .. } => true,
            Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::NetworkError(_)
            | Self::Timeout(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_expected() {
        assert!(CoreError::DomainNotFound("a.com".to_string()).is_expected());
        assert!(CoreError::NotAuthorized("bob".to_string()).is_expected());
        assert!(CoreError::ImportError {
            row: 2,
            domain: "a.com".to_string(),
            reason: "bad date".to_string(),
        }
        .is_expected());
    }

    #[test]
    fn infrastructure_errors_are_unexpected() {
        assert!(!CoreError::StorageError("disk full".to_string()).is_expected());
        assert!(!CoreError::Timeout("dns".to_string()).is_expected());
    }

    #[test]
    fn import_error_message_names_row_and_domain() {
        let err = CoreError::ImportError {
            row: 3,
            domain: "example.com".to_string(),
            reason: "missing expiration".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Import error at row 3 (example.com): missing expiration"
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::DomainNotFound("x.io".to_string())).unwrap();
        assert_eq!(json["code"], "DomainNotFound");
        assert_eq!(json["details"], "x.io");
    }
}
