//! Authentication error types.

use thiserror::Error;

use crate::ports::StoreError;

/// Errors raised by registration, login, and account settings changes.
///
/// `DuplicateEmail` and `InvalidCredentials` are recovered locally as
/// user-facing notices; `Storage` is the only variant that surfaces as a
/// server error.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address is already registered.
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password. Deliberately a single variant so
    /// both cases produce the same user-facing message.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            StoreError::NotFound => AuthError::Storage("account row disappeared".to_string()),
            StoreError::Database(msg) => AuthError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_store_error_maps_to_duplicate_email() {
        let err: AuthError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[test]
    fn database_store_error_maps_to_storage() {
        let err: AuthError = StoreError::Database("connection refused".to_string()).into();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[test]
    fn invalid_credentials_message_does_not_leak_which_part_failed() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
