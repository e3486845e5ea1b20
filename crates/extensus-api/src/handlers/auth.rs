//! Sign-in, sign-out, and forgotten-password handlers.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::info;
use validator::Validate;

use extensus_auth::sanitize_return_path;
use extensus_core::error::ErrorKind;

use crate::cookies::{cleared_session_cookie, session_cookie};
use crate::dto::request::{ForgotForm, ReturnQuery, SignInForm};
use crate::error::ApiError;
use crate::extractors::CurrentAccount;
use crate::pages;
use crate::state::AppState;

/// GET /
pub async fn sign_in_page(Query(query): Query<ReturnQuery>) -> Html<String> {
    pages::sign_in(None, query.return_to.as_deref())
}

/// POST /
///
/// On success sets the session cookie and redirects to the sanitized
/// `return` path or the landing page. Any credential failure renders the
/// same 401 page.
pub async fn sign_in(
    State(state): State<AppState>,
    Query(query): Query<ReturnQuery>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Result<Response, ApiError> {
    match state.issuer.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let cookie = session_cookie(
                session.token,
                session.expires_at,
                state.config.auth.cookie_secure,
            );
            let target = sanitize_return_path(
                query.return_to.as_deref(),
                &state.config.auth.landing_path,
            );
            Ok((jar.add(cookie), Redirect::to(&target)).into_response())
        }
        Err(err) if err.kind == ErrorKind::Authentication => Ok((
            StatusCode::UNAUTHORIZED,
            pages::sign_in(Some(&err.message), query.return_to.as_deref()),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// GET /logout
pub async fn sign_out(
    State(state): State<AppState>,
    account: CurrentAccount,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    info!(account_id = %account.id, "Signed out");
    let jar = jar.add(cleared_session_cookie(state.config.auth.cookie_secure));
    (jar, Redirect::to("/"))
}

/// GET /forgot
pub async fn forgot_page() -> Html<String> {
    pages::forgot(None, None)
}

/// POST /forgot
///
/// Reports whether the address is well-formed. Delivery of reset
/// instructions happens outside this service.
pub async fn forgot(Form(form): Form<ForgotForm>) -> Response {
    match form.validate() {
        Ok(()) => pages::forgot(
            None,
            Some("If an account exists for that address, reset instructions are on their way."),
        )
        .into_response(),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            pages::forgot(Some("Email address is not valid"), None),
        )
            .into_response(),
    }
}
