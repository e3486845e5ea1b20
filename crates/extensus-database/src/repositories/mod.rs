//! Concrete account store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
