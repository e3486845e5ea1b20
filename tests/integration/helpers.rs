//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use extensus_api::{AppState, build_app};
use extensus_auth::TokenCodec;
use extensus_core::config::AppConfig;
use extensus_database::{AccountStore, MemoryAccountStore};
use extensus_entity::Account;

pub const SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to services
    pub state: AppState,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The first `Set-Cookie` header.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }

    /// Value of the `token` cookie being set, if any.
    pub fn session_token(&self) -> Option<String> {
        let set_cookie = self.set_cookie()?;
        let pair = set_cookie.split(';').next()?;
        let value = pair.strip_prefix("token=")?;
        Some(value.to_string())
    }
}

impl TestApp {
    /// Configuration with a known secret and cheap hashing.
    pub fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.auth.hash_memory_kib = 1024;
        config.auth.hash_iterations = 1;
        config.auth.hash_parallelism = 1;
        config
    }

    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryAccountStore::new()))
    }

    /// Create a test application over `store`
    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        let state = AppState::new(Self::config(), store).expect("Failed to build state");
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// A codec sharing the application's secret.
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::from_config(&self.state.config.auth).expect("codec")
    }

    /// Register an account through the registrar.
    pub async fn create_account(&self, name: &str, email: &str, password: &str) -> Account {
        self.state
            .registrar
            .register(name, email, password)
            .await
            .expect("Failed to create account")
    }

    /// Send a request, optionally carrying a session cookie.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        form: Option<&str>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("token={token}"));
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send("GET", uri, None, token).await
    }

    /// POST a form body to `uri`.
    pub async fn post_form(&self, uri: &str, form: &str, token: Option<&str>) -> TestResponse {
        self.send("POST", uri, Some(form), token).await
    }

    /// Sign in and return the session token.
    pub async fn sign_in(&self, email: &str, password: &str) -> String {
        let form = format!(
            "email={}&password={}",
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        self.post_form("/", &form, None)
            .await
            .session_token()
            .expect("sign-in should set the session cookie")
    }
}
