//! Registration, login, and logout.

mod dto;
mod handlers;
mod routes;

pub use dto::{LoginForm, RegisterForm};
pub use routes::routes;
