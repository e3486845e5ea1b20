//! Opaque password hash value.

use std::fmt;

/// A salted password hash in PHC string format.
///
/// Values are produced by the password hasher or read back from storage.
/// The plaintext never passes through this type and the hash is never
/// printed.
#[derive(Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a PHC string produced by a password hasher or loaded from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string, for verification and persistence.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}
