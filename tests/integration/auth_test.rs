//! Integration tests for the sign-in and sign-out flow.

mod helpers;

use axum::http::StatusCode;

use extensus_database::AccountStore;

use helpers::TestApp;

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "analytical-engine";

async fn app_with_account() -> TestApp {
    let app = TestApp::new();
    app.create_account("Ada Lovelace", EMAIL, PASSWORD).await;
    app
}

fn credentials(email: &str, password: &str) -> String {
    format!(
        "email={}&password={}",
        urlencoding::encode(email),
        urlencoding::encode(password)
    )
}

#[tokio::test]
async fn test_sign_in_sets_cookie_and_redirects_to_dashboard() {
    let app = app_with_account().await;

    let response = app
        .post_form("/", &credentials(EMAIL, PASSWORD), None)
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Expires="));

    let token = response.session_token().unwrap();
    let account = app
        .state
        .accounts
        .fetch_by_email(EMAIL)
        .await
        .unwrap();
    assert_eq!(app.codec().validate(&token).unwrap(), account.id);
}

#[tokio::test]
async fn test_sign_in_honours_return_path() {
    let app = app_with_account().await;

    let response = app
        .post_form(
            "/?return=%2Freports%3Fyear%3D2024",
            &credentials(EMAIL, PASSWORD),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/reports?year=2024"));
}

#[tokio::test]
async fn test_sign_in_ignores_off_site_return_path() {
    let app = app_with_account().await;

    for target in ["https%3A%2F%2Fevil.example%2F", "%2F%2Fevil.example"] {
        let response = app
            .post_form(
                &format!("/?return={target}"),
                &credentials(EMAIL, PASSWORD),
                None,
            )
            .await;
        assert_eq!(response.location(), Some("/dashboard"));
    }
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_identical() {
    let app = app_with_account().await;

    let wrong_password = app
        .post_form("/", &credentials(EMAIL, "difference-engine"), None)
        .await;
    let unknown_email = app
        .post_form("/", &credentials("nobody@example.com", PASSWORD), None)
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert!(wrong_password.body.contains("Invalid email or password"));
    assert!(wrong_password.set_cookie().is_none());
    assert!(unknown_email.set_cookie().is_none());
}

#[tokio::test]
async fn test_failed_sign_in_keeps_return_path_in_form() {
    let app = app_with_account().await;

    let response = app
        .post_form(
            "/?return=%2Freports",
            &credentials(EMAIL, "nope-nope-nope"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("action=\"/?return=%2Freports\""));
}

#[tokio::test]
async fn test_session_cookie_opens_dashboard() {
    let app = app_with_account().await;
    let token = app.sign_in(EMAIL, PASSWORD).await;

    let response = app.get("/dashboard", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Welcome, Ada Lovelace"));
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let app = app_with_account().await;
    let token = app.sign_in(EMAIL, PASSWORD).await;

    let response = app.get("/logout", Some(&token)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    let cookie = response.set_cookie().expect("clearing cookie");
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("1970"));

    let next = app.get("/dashboard", None).await;
    assert_eq!(next.status, StatusCode::SEE_OTHER);
    assert_eq!(next.location(), Some("/?return=%2Fdashboard"));
}

#[tokio::test]
async fn test_sign_in_page_renders_for_anonymous() {
    let app = TestApp::new();

    let response = app.get("/?return=%2Fdashboard", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<form method=\"post\""));
    assert!(response.body.contains("action=\"/?return=%2Fdashboard\""));
}

#[tokio::test]
async fn test_forgot_reports_address_format() {
    let app = TestApp::new();

    let page = app.get("/forgot", None).await;
    assert_eq!(page.status, StatusCode::OK);

    let valid = app.post_form("/forgot", "email=ada%40example.com", None).await;
    assert_eq!(valid.status, StatusCode::OK);
    assert!(valid.body.contains("reset instructions"));

    let invalid = app.post_form("/forgot", "email=not-an-address", None).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert!(invalid.body.contains("Email address is not valid"));
}

#[tokio::test]
async fn test_health_is_ungated() {
    let app = app_with_account().await;
    let token = app.sign_in(EMAIL, PASSWORD).await;

    for token in [None, Some(token.as_str())] {
        let response = app.get("/health", token).await;
        assert_eq!(response.status, StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }
}
