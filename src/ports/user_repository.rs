//! Account store port.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::User;

/// Errors from the account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-email constraint violated.
    #[error("Email is already registered")]
    DuplicateEmail,

    /// The referenced account row does not exist.
    #[error("Account not found")]
    NotFound,

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Result of an entitlement grant keyed by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// Exactly one account matched and now holds the entitlement.
    Granted,
    /// No account with that email exists.
    NoMatchingAccount,
}

/// Persistence port for accounts.
///
/// Implementations enforce email uniqueness at the storage level and
/// execute `grant_premium` as a single atomic update so webhook
/// reconciliation cannot race a concurrent settings change.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account with entitlement off.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Exact-match lookup; the email key is case-sensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn update_email(&self, id: Uuid, new_email: &str) -> Result<(), StoreError>;

    async fn update_password_hash(&self, id: Uuid, new_hash: &str) -> Result<(), StoreError>;

    /// Set the entitlement flag for the account with this exact email,
    /// in one atomic statement.
    async fn grant_premium(&self, email: &str) -> Result<GrantOutcome, StoreError>;
}
