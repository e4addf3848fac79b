//! POST `/api/logout`.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use super::session::{clear_session_cookie, extract_session_token};
use super::storage::delete_session;

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out, session cookie cleared"),
        (status = 500, description = "Logout failed")
    ),
    tag = "auth"
)]
pub async fn logout(pool: Extension<PgPool>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(err) = delete_session(&pool, &token).await {
            error!("Failed to delete session: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Logout failed." })),
            )
                .into_response();
        }
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, clear_session_cookie());
    (
        StatusCode::OK,
        response_headers,
        Json(json!({ "success": true, "message": "Logged out successfully." })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn logout_without_cookie_clears_and_succeeds() -> Result<()> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/snovaedu")?;
        let response = logout(Extension(pool), HeaderMap::new()).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(set_cookie.contains("Max-Age=0"));
        Ok(())
    }
}
