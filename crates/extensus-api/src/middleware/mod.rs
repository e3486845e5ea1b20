//! Request middleware.

pub mod auth;
pub mod logging;

pub use auth::{Identity, require_absent, require_present};
