//! `CurrentAccount` extractor: reads the identity attached by the
//! `require_present` gate.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use extensus_core::error::AppError;
use extensus_entity::Account;

use crate::error::ApiError;
use crate::middleware::auth::Identity;

/// The signed-in account, available to handlers behind `require_present`.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Arc<Account>);

impl std::ops::Deref for CurrentAccount {
    type Target = Account;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .map(|identity| CurrentAccount(Arc::clone(identity.account())))
            .ok_or_else(|| {
                ApiError::from(AppError::internal(
                    "CurrentAccount used on a route without the require_present gate",
                ))
            })
    }
}
