//! Convenience result type alias for Extensus.

use crate::error::AppError;

/// A specialized `Result` type for Extensus operations.
pub type AppResult<T> = Result<T, AppError>;
