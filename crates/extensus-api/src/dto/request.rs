//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

/// Sign-in form body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Forgotten-password form body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotForm {
    /// Address to send reset instructions to.
    #[serde(default)]
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
}

/// Query carrying the path to return to after sign-in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnQuery {
    /// Relative path, sanitized before use.
    #[serde(rename = "return")]
    pub return_to: Option<String>,
}
