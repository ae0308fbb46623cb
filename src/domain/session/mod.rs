//! Browser sessions as signed tokens.
//!
//! A session is a stateless HS256 token binding a cookie to a user id, with
//! issued-at and expiry claims. Authorization state (the premium flag) is
//! deliberately NOT embedded: every request re-reads the account row, so a
//! mid-session entitlement change takes effect immediately.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SessionConfig;

/// Errors raised when a presented session token is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session expired")]
    Expired,

    #[error("Invalid session token")]
    Invalid,
}

/// Claims carried inside a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// User id the session belongs to.
    sub: Uuid,
    /// Issued at (Unix seconds).
    iat: i64,
    /// Expiry (Unix seconds).
    exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct SessionSigner {
    secret: SecretString,
    ttl_minutes: u64,
    cookie_name: String,
}

impl SessionSigner {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            ttl_minutes: config.ttl_minutes,
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Name of the cookie the token travels in.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Issue a fresh session token for a user.
    pub fn issue(&self, user_id: Uuid) -> String {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.ttl_minutes as i64)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .expect("HS256 encoding of plain claims cannot fail")
    }

    /// Verify a presented token and return the user id it binds.
    pub fn verify(&self, token: &str) -> Result<Uuid, SessionError> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid,
        })?;

        Ok(data.claims.sub)
    }
}
