//! Account entity and its lookup keys.

pub mod lookup;
pub mod model;
pub mod password;

pub use lookup::AccountLookup;
pub use model::{Account, NewAccount, VALID_NAME};
pub use password::HashedPassword;
