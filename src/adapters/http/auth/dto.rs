//! Form payloads for the auth routes.

use serde::Deserialize;

/// Credentials submitted by the login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Credentials submitted by the registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_requires_both_fields() {
        let ok: Result<LoginForm, _> =
            serde_json::from_str(r#"{"email":"a@example.com","password":"secret123"}"#);
        assert!(ok.is_ok());

        let missing: Result<LoginForm, _> = serde_json::from_str(r#"{"email":"a@example.com"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn register_form_requires_both_fields() {
        let missing: Result<RegisterForm, _> = serde_json::from_str(r#"{"password":"x"}"#);
        assert!(missing.is_err());
    }
}
