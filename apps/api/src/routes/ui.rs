use axum::response::Html;

/// GET /
/// The single page. All interaction happens against /api/v1 from here.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
