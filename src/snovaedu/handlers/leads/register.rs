//! POST `/api/register`.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use super::storage::insert_registration;
use super::types::RegisterRequest;
use crate::snovaedu::handlers::valid_email;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration stored"),
        (status = 400, description = "Invalid email or missing fields"),
        (status = 500, description = "Storage failure")
    ),
    tag = "leads"
)]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    if !request.email.as_deref().map_or(false, valid_email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid email format" })),
        )
            .into_response();
    }

    let (Some(first_name), Some(last_name), Some(email)) =
        (request.first_name, request.last_name, request.email)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields." })),
        )
            .into_response();
    };

    if let Err(err) = insert_registration(
        &pool,
        &first_name,
        &last_name,
        &email,
        request.referral_code.as_deref(),
    )
    .await
    {
        error!("Registration insert failed: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
