//! Credential checking and session issuance.

pub mod issuer;

pub use issuer::{IssuedSession, SessionIssuer};
