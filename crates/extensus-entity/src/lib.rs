//! # extensus-entity
//!
//! Domain entity models for Extensus. Database entities derive
//! `sqlx::FromRow`; inputs that must pass format checks before persistence
//! derive `validator::Validate`.

pub mod account;

pub use account::{Account, AccountLookup, HashedPassword, NewAccount};
