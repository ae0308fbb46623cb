//! Payment configuration (Stripe)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_test_... or sk_live_...)
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret (whsec_...)
    pub stripe_webhook_secret: SecretString,

    /// Stripe price ID for the premium subscription
    pub premium_price_id: String,

    /// Price shown on the premium page
    #[serde(default = "default_display_price")]
    pub display_price: String,

    /// Absolute URL the browser is sent to after a completed checkout
    pub success_url: String,

    /// Absolute URL the browser is sent to when checkout is abandoned
    pub cancel_url: String,

    /// Base URL for the Stripe API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for Stripe API calls in seconds
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if !self.stripe_api_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self
            .stripe_webhook_secret
            .expose_secret()
            .starts_with("whsec_")
        {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if !self.premium_price_id.starts_with("price_") {
            return Err(ValidationError::InvalidStripePriceId);
        }
        if self.success_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUCCESS_URL"));
        }
        if self.cancel_url.is_empty() {
            return Err(ValidationError::MissingRequired("CANCEL_URL"));
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: SecretString::new(String::new()),
            stripe_webhook_secret: SecretString::new(String::new()),
            premium_price_id: String::new(),
            display_price: default_display_price(),
            success_url: String::new(),
            cancel_url: String::new(),
            api_base_url: default_api_base_url(),
            api_timeout_secs: default_api_timeout(),
        }
    }
}

fn default_display_price() -> String {
    "5.00".to_string()
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_api_timeout() -> u64 {
    15
}
