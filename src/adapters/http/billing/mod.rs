//! Premium page, hosted checkout, and the provider webhook.

mod handlers;
mod routes;

pub use routes::routes;
