//! # extensus-auth
//!
//! Authentication for Extensus.
//!
//! ## Modules
//!
//! - `token` — signed session token issuance and validation
//! - `password` — Argon2id hashing and password policy
//! - `resolver` — token to account resolution through the identity cache
//! - `session` — credential checking and session issuance
//! - `accounts` — account registration, password changes, startup seeding
//! - `redirect` — sanitizing post-sign-in return paths

pub mod accounts;
pub mod error;
pub mod password;
pub mod redirect;
pub mod resolver;
pub mod session;
pub mod token;

pub use accounts::AccountRegistrar;
pub use error::AuthError;
pub use password::{PasswordHasher, PasswordPolicy};
pub use redirect::sanitize_return_path;
pub use resolver::{IdentityResolver, Resolution};
pub use session::{IssuedSession, SessionIssuer};
pub use token::{Claims, IssuedToken, TokenCodec};
