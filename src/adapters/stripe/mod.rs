//! Stripe adapter for hosted checkout sessions.

mod checkout;

pub use checkout::StripeCheckoutClient;
