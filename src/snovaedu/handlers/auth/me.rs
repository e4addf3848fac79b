//! GET `/api/me`.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use super::session::extract_session_token;
use super::storage::{fetch_member, lookup_session};

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current member profile", body = crate::snovaedu::handlers::auth::types::MemberResponse),
        (status = 401, description = "Not authenticated, session missing or expired"),
        (status = 404, description = "Member not found"),
        (status = 500, description = "Failed to fetch member info")
    ),
    tag = "auth"
)]
pub async fn me(pool: Extension<PgPool>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = extract_session_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated." })),
        )
            .into_response();
    };

    let session = match lookup_session(&pool, &token).await {
        Ok(session) => session,
        Err(err) => {
            error!("Session lookup failed: {err}");
            return fetch_failed();
        }
    };

    // A missing row and an expired row answer differently, so expiry is
    // checked here rather than in the query.
    let Some(session) = session else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Session not found." })),
        )
            .into_response();
    };

    if session.expires_at <= Utc::now() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Session expired." })),
        )
            .into_response();
    }

    let member = match fetch_member(&pool, session.member_id).await {
        Ok(member) => member,
        Err(err) => {
            error!("Member fetch failed: {err}");
            return fetch_failed();
        }
    };

    match member {
        Some(member) => {
            (StatusCode::OK, Json(json!({ "success": true, "member": member }))).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Member not found." })),
        )
            .into_response(),
    }
}

fn fetch_failed() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to fetch member info." })),
    )
        .into_response()
}
