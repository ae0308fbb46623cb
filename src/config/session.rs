//! Session configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum acceptable signing secret length in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Session configuration (cookie-borne signed tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session tokens
    pub secret: SecretString,

    /// Session lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_SECRET"));
        }
        if self.secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::SessionSecretTooShort);
        }
        if self.ttl_minutes == 0 || self.ttl_minutes > 60 * 24 * 30 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::new(String::new()),
            ttl_minutes: default_ttl_minutes(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    60 * 24
}

fn default_cookie_name() -> String {
    "cockpit_session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> SessionConfig {
        SessionConfig {
            secret: SecretString::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_minutes, 1440);
        assert_eq!(config.cookie_name, "cockpit_session");
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = SessionConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_short_secret() {
        let config = config_with_secret("devkey");
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SessionSecretTooShort)
        ));
    }

    #[test]
    fn test_validation_invalid_ttl() {
        let mut config = config_with_secret(&"x".repeat(32));
        config.ttl_minutes = 0;
        assert!(config.validate().is_err());

        config.ttl_minutes = 60 * 24 * 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config_with_secret(&"x".repeat(32));
        assert!(config.validate().is_ok());
    }
}
