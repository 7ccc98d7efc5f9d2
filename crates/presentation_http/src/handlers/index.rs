//! Browser UI handler

use axum::response::Html;

/// The single-page UI, served as static HTML with no build step
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
