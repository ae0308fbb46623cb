//! User accounts and authentication.
//!
//! The [`User`] entity is plain data; authentication capability lives in the
//! separate [`Authenticatable`] trait so storage code never grows login
//! behavior. [`AuthService`] orchestrates registration, login, and
//! self-service settings changes over the [`UserRepository`] port.

mod errors;
mod password;

pub use errors::AuthError;
pub use password::{hash_password, verify_password};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::UserRepository;

/// A registered account.
///
/// `is_premium` is the sole authorization signal for the gated search
/// feature. It defaults to false at registration and is only ever flipped to
/// true by the webhook reconciler.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Unique, case-sensitive account key.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Capability interface for anything that can prove an identity.
///
/// Kept separate from the entity so handlers depend on the capability, not
/// the storage shape.
pub trait Authenticatable {
    /// Stable identifier bound into the session.
    fn auth_id(&self) -> Uuid;

    /// Check a candidate password against the stored verifier.
    fn verify(&self, candidate: &str) -> bool;
}

impl Authenticatable for User {
    fn auth_id(&self) -> Uuid {
        self.id
    }

    fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash)
    }
}

/// Registration, login, and settings operations.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account with entitlement off.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if the email is already registered (enforced by
    ///   the store's unique index, not a pre-check)
    /// - `PasswordHash` / `Storage` on infrastructure failure
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let hash = hash_password(password)?;
        let user = self.users.create(email, &hash).await?;

        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Authenticate an email/password pair.
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`;
    /// callers must not distinguish the two.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.users.find_by_email(email).await?;

        match user {
            Some(user) if user.verify(password) => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Change the account email.
    pub async fn change_email(&self, user_id: Uuid, new_email: &str) -> Result<(), AuthError> {
        self.users.update_email(user_id, new_email).await?;
        Ok(())
    }

    /// Change the account password, re-hashing with a fresh salt.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let hash = hash_password(new_password)?;
        self.users.update_password_hash(user_id, &hash).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory user repository shared by domain and HTTP tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::ports::{GrantOutcome, StoreError, UserRepository};

    use super::User;

    /// In-memory store mirroring the Postgres adapter's semantics,
    /// including the unique-email constraint.
    pub struct InMemoryUserRepository {
        users: Mutex<HashMap<Uuid, User>>,
        fail_writes: bool,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                fail_writes: false,
            }
        }

        /// A store whose writes fail, for storage-failure paths.
        pub fn failing() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                fail_writes: true,
            }
        }

        pub fn insert(&self, user: User) {
            self.users.lock().unwrap().insert(user.id, user);
        }

        pub fn get(&self, id: Uuid) -> Option<User> {
            self.users.lock().unwrap().get(&id).cloned()
        }

        pub fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        /// Test-only synchronous flag flip, bypassing the port.
        pub fn set_premium(&self, email: &str) {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.values_mut().find(|u| u.email == email) {
                user.is_premium = true;
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
            if self.fail_writes {
                return Err(StoreError::Database("simulated write failure".to_string()));
            }
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                is_premium: false,
                created_at: now,
                updated_at: now,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn update_email(&self, id: Uuid, new_email: &str) -> Result<(), StoreError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == new_email && u.id != id) {
                return Err(StoreError::DuplicateEmail);
            }
            let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
            user.email = new_email.to_string();
            user.updated_at = Utc::now();
            Ok(())
        }

        async fn update_password_hash(&self, id: Uuid, new_hash: &str) -> Result<(), StoreError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
            user.password_hash = new_hash.to_string();
            user.updated_at = Utc::now();
            Ok(())
        }

        async fn grant_premium(&self, email: &str) -> Result<GrantOutcome, StoreError> {
            if self.fail_writes {
                return Err(StoreError::Database("simulated write failure".to_string()));
            }
            let mut users = self.users.lock().unwrap();
            match users.values_mut().find(|u| u.email == email) {
                Some(user) => {
                    user.is_premium = true;
                    user.updated_at = Utc::now();
                    Ok(GrantOutcome::Granted)
                }
                None => Ok(GrantOutcome::NoMatchingAccount),
            }
        }
    }
}
