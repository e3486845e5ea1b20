//! Access gates: route layers that admit or redirect a request based on the
//! identity its session cookie resolves to.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::debug;

use extensus_auth::Resolution;
use extensus_core::types::AccountId;
use extensus_entity::Account;

use crate::cookies::TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in account of the current request.
///
/// Only [`require_present`] attaches one.
#[derive(Debug, Clone)]
pub struct Identity(Arc<Account>);

impl Identity {
    fn new(account: Arc<Account>) -> Self {
        Self(account)
    }

    /// The signed-in account.
    pub fn account(&self) -> &Arc<Account> {
        &self.0
    }

    /// The signed-in account's identifier.
    pub fn id(&self) -> AccountId {
        self.0.id
    }
}

/// Admit only anonymous requests; signed-in users go to the landing page.
pub async fn require_absent(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let token = jar.get(TOKEN_COOKIE).map(|c| c.value());

    match state.resolver.resolve(token).await {
        Ok(Resolution::Authenticated(account)) => {
            debug!(account_id = %account.id, "Already signed in, redirecting to landing page");
            Redirect::to(&state.config.auth.landing_path).into_response()
        }
        Ok(Resolution::Anonymous | Resolution::Rejected(_)) => next.run(request).await,
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Admit only signed-in requests and attach their [`Identity`]; anyone else
/// is sent to the sign-in page with a `return` pointing back here.
pub async fn require_present(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(TOKEN_COOKIE).map(|c| c.value());

    match state.resolver.resolve(token).await {
        Ok(Resolution::Authenticated(account)) => {
            let identity = Identity::new(account);
            debug!(account_id = %identity.id(), "Admitting signed-in request");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Ok(Resolution::Anonymous | Resolution::Rejected(_)) => {
            Redirect::to(&sign_in_location(request.uri())).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// `/?return=<path and query of uri>`, percent-encoded.
fn sign_in_location(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("/?return={}", urlencoding::encode(target))
}
