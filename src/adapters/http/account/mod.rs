//! Dashboard, settings, and liveness.

mod dto;
mod handlers;
mod routes;

pub use dto::SettingsForm;
pub use routes::routes;
