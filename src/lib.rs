//! Search Cockpit - account registration, Stripe subscription checkout, and
//! a premium-gated listing search proxy.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
