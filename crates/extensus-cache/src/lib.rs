//! # extensus-cache
//!
//! The identity cache: a process-wide map from lookup keys to previously
//! resolved entities, filled on demand and never evicted.

pub mod identity;

pub use identity::IdentityCache;
