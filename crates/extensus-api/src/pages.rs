//! Minimal HTML pages served by the handlers.

use axum::response::Html;

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} · Extensus</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn notice(class: &str, message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"{class}\">{}</p>\n", escape(m)))
        .unwrap_or_default()
}

/// The sign-in form. `return_to` is carried through to the form action.
pub fn sign_in(error: Option<&str>, return_to: Option<&str>) -> Html<String> {
    let action = match return_to.filter(|r| !r.is_empty()) {
        Some(target) => format!("/?return={}", urlencoding::encode(target)),
        None => "/".to_string(),
    };

    layout(
        "Sign in",
        &format!(
            "<h1>Sign in</h1>\n{}<form method=\"post\" action=\"{}\">\n\
             <label>Email <input type=\"email\" name=\"email\" required></label>\n\
             <label>Password <input type=\"password\" name=\"password\" required></label>\n\
             <button type=\"submit\">Sign in</button>\n</form>\n\
             <p><a href=\"/forgot\">Forgot your password?</a></p>",
            notice("error", error),
            escape(&action)
        ),
    )
}

/// The forgotten-password form with an optional outcome message.
pub fn forgot(error: Option<&str>, info: Option<&str>) -> Html<String> {
    layout(
        "Forgot password",
        &format!(
            "<h1>Forgot password</h1>\n{}{}<form method=\"post\" action=\"/forgot\">\n\
             <label>Email <input type=\"email\" name=\"email\" required></label>\n\
             <button type=\"submit\">Send reset link</button>\n</form>\n\
             <p><a href=\"/\">Back to sign in</a></p>",
            notice("error", error),
            notice("info", info)
        ),
    )
}

/// The landing page for a signed-in account.
pub fn dashboard(name: &str) -> Html<String> {
    layout(
        "Dashboard",
        &format!(
            "<h1>Welcome, {}</h1>\n<p><a href=\"/logout\">Sign out</a></p>",
            escape(name)
        ),
    )
}
