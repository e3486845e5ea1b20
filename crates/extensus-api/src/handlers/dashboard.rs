//! Landing page for signed-in accounts.

use axum::response::Html;

use crate::extractors::CurrentAccount;
use crate::pages;

/// GET /dashboard
pub async fn dashboard(account: CurrentAccount) -> Html<String> {
    pages::dashboard(&account.name)
}
