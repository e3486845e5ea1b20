//! # extensus-core
//!
//! Core crate for Extensus. Contains the configuration schema and loader,
//! typed identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Extensus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
