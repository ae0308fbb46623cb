//! User-facing notices carried across redirects.
//!
//! Redirect targets receive a `notice` query parameter holding one of these
//! codes; the landing page renders the matching message. Codes keep dynamic
//! text out of redirect URLs.

use serde::Deserialize;

/// Query parameters carrying a notice code.
#[derive(Debug, Deserialize, Default)]
pub struct NoticeParams {
    pub notice: Option<String>,
}

/// Notices shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginRequired,
    LoginOk,
    RegisterOk,
    LoggedOut,
    InvalidCredentials,
    DuplicateEmail,
    PremiumRequired,
    EmailUpdated,
    PasswordUpdated,
    MissingQuery,
}

impl Notice {
    /// Code used in the `notice` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Notice::LoginRequired => "login_required",
            Notice::LoginOk => "login_ok",
            Notice::RegisterOk => "register_ok",
            Notice::LoggedOut => "logged_out",
            Notice::InvalidCredentials => "invalid_credentials",
            Notice::DuplicateEmail => "duplicate_email",
            Notice::PremiumRequired => "premium_required",
            Notice::EmailUpdated => "email_updated",
            Notice::PasswordUpdated => "password_updated",
            Notice::MissingQuery => "missing_query",
        }
    }

    /// Parse a query-parameter code; unknown codes render nothing.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "login_required" => Some(Notice::LoginRequired),
            "login_ok" => Some(Notice::LoginOk),
            "register_ok" => Some(Notice::RegisterOk),
            "logged_out" => Some(Notice::LoggedOut),
            "invalid_credentials" => Some(Notice::InvalidCredentials),
            "duplicate_email" => Some(Notice::DuplicateEmail),
            "premium_required" => Some(Notice::PremiumRequired),
            "email_updated" => Some(Notice::EmailUpdated),
            "password_updated" => Some(Notice::PasswordUpdated),
            "missing_query" => Some(Notice::MissingQuery),
            _ => None,
        }
    }

    /// Human-readable message for the landing page.
    pub fn message(self) -> &'static str {
        match self {
            Notice::LoginRequired => "Please log in to continue.",
            Notice::LoginOk => "Login successful.",
            Notice::RegisterOk => "Registration successful. You can log in now.",
            Notice::LoggedOut => "You have been logged out.",
            Notice::InvalidCredentials => "Invalid email or password.",
            Notice::DuplicateEmail => "This email is already registered.",
            Notice::PremiumRequired => "This feature is available to premium accounts only.",
            Notice::EmailUpdated => "Email address updated.",
            Notice::PasswordUpdated => "Password updated.",
            Notice::MissingQuery => "Please enter a search term.",
        }
    }

    /// Redirect target carrying this notice.
    pub fn redirect_to(self, path: &str) -> String {
        format!("{}?notice={}", path, self.code())
    }
}

/// Resolve an optional query-parameter code to its message.
pub fn message_for(code: Option<&str>) -> Option<&'static str> {
    code.and_then(Notice::from_code).map(Notice::message)
}
