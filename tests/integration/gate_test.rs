//! Integration tests for the access gates and identity propagation.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Duration;

use extensus_auth::TokenCodec;
use extensus_core::error::AppError;
use extensus_core::result::AppResult;
use extensus_core::types::AccountId;
use extensus_database::{AccountStore, MemoryAccountStore};
use extensus_entity::{Account, AccountLookup, NewAccount};

use helpers::TestApp;

const EMAIL: &str = "grace@example.com";
const PASSWORD: &str = "cobol-forever";

async fn app_with_account() -> (TestApp, Account) {
    let app = TestApp::new();
    let account = app.create_account("Grace Hopper", EMAIL, PASSWORD).await;
    (app, account)
}

/// A store whose every call fails as if the database were unreachable.
#[derive(Debug)]
struct UnreachableStore;

fn unreachable() -> AppError {
    AppError::database("connection refused by db.internal:5432")
}

#[async_trait]
impl AccountStore for UnreachableStore {
    async fn fetch_by_id(&self, _id: AccountId) -> AppResult<Account> {
        Err(unreachable())
    }

    async fn fetch_by_email(&self, _email: &str) -> AppResult<Account> {
        Err(unreachable())
    }

    async fn insert(&self, _account: NewAccount) -> AppResult<Account> {
        Err(unreachable())
    }

    async fn update(&self, _account: &Account) -> AppResult<Account> {
        Err(unreachable())
    }

    async fn delete(&self, _id: AccountId) -> AppResult<bool> {
        Err(unreachable())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        Err(unreachable())
    }
}

/// An in-memory store that counts identifier lookups.
#[derive(Debug, Default)]
struct CountingStore {
    inner: MemoryAccountStore,
    fetches_by_id: AtomicUsize,
}

#[async_trait]
impl AccountStore for CountingStore {
    async fn fetch_by_id(&self, id: AccountId) -> AppResult<Account> {
        self.fetches_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_by_id(id).await
    }

    async fn fetch_by_email(&self, email: &str) -> AppResult<Account> {
        self.inner.fetch_by_email(email).await
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        self.inner.insert(account).await
    }

    async fn update(&self, account: &Account) -> AppResult<Account> {
        self.inner.update(account).await
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        self.inner.list().await
    }
}

#[tokio::test]
async fn test_protected_without_cookie_redirects_with_return() {
    let (app, _) = app_with_account().await;

    let response = app.get("/dashboard?tab=billing", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location(),
        Some("/?return=%2Fdashboard%3Ftab%3Dbilling")
    );
}

#[tokio::test]
async fn test_protected_with_valid_token_sees_account() {
    let (app, account) = app_with_account().await;
    let token = app.codec().issue(account.id).unwrap().token;

    let response = app.get("/dashboard", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Welcome, Grace Hopper"));
}

#[tokio::test]
async fn test_protected_rejects_unusable_tokens() {
    let (app, account) = app_with_account().await;

    let expired = app
        .codec()
        .issue_with_window(account.id, Duration::seconds(-5))
        .unwrap()
        .token;
    let foreign = TokenCodec::new("some-other-secret", Duration::days(5))
        .unwrap()
        .issue(account.id)
        .unwrap()
        .token;
    let orphaned = app.codec().issue(AccountId(404)).unwrap().token;

    for token in [
        expired.as_str(),
        foreign.as_str(),
        orphaned.as_str(),
        "garbage",
        "",
    ] {
        let response = app.get("/dashboard", Some(token)).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "token {token:?}");
        assert_eq!(response.location(), Some("/?return=%2Fdashboard"));
    }
}

#[tokio::test]
async fn test_public_with_valid_token_redirects_to_landing() {
    let (app, account) = app_with_account().await;
    let token = app.codec().issue(account.id).unwrap().token;

    for path in ["/", "/forgot"] {
        let response = app.get(path, Some(&token)).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location(), Some("/dashboard"));
    }

    let response = app
        .post_form("/", "email=grace%40example.com&password=x", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_public_with_rejected_token_is_served() {
    let (app, account) = app_with_account().await;
    let expired = app
        .codec()
        .issue_with_window(account.id, Duration::seconds(-5))
        .unwrap()
        .token;

    for token in [None, Some("garbage"), Some(expired.as_str())] {
        let response = app.get("/", token).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_concurrent_requests_resolve_identity_once() {
    let store = Arc::new(CountingStore::default());
    let app = TestApp::with_store(store.clone());
    let account = app.create_account("Grace Hopper", EMAIL, PASSWORD).await;
    let token = app.codec().issue(account.id).unwrap().token;

    let requests = (0..10).map(|_| app.get("/dashboard", Some(&token)));
    let responses = futures::future::join_all(requests).await;

    assert!(responses.iter().all(|r| r.status == StatusCode::OK));
    assert_eq!(store.fetches_by_id.load(Ordering::SeqCst), 1);

    let again = app.get("/dashboard", Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(store.fetches_by_id.load(Ordering::SeqCst), 1);
    let cache = app.state.resolver.cache();
    assert!(cache.contains(&AccountLookup::ById(account.id)));
    assert_eq!(cache.entry_count().await, 1);
}

#[tokio::test]
async fn test_store_failure_is_a_generic_server_error() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let token = app.codec().issue(AccountId(1)).unwrap().token;

    for path in ["/dashboard", "/"] {
        let response = app.get(path, Some(&token)).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert!(response.location().is_none());
        assert!(!response.body.contains("db.internal"));
    }
}

#[tokio::test]
async fn test_sign_in_store_failure_is_a_generic_server_error() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));

    let response = app
        .post_form("/", "email=grace%40example.com&password=cobol-forever", None)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.body.contains("db.internal"));
    assert!(response.set_cookie().is_none());
}
