//! POST `/api/apply`.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use super::storage::insert_application;
use super::types::ApplyRequest;
use crate::snovaedu::handlers::valid_email;

#[utoipa::path(
    post,
    path = "/api/apply",
    request_body = ApplyRequest,
    responses(
        (status = 200, description = "Application stored"),
        (status = 400, description = "Invalid email or missing fields"),
        (status = 500, description = "Storage failure")
    ),
    tag = "leads"
)]
pub async fn apply(
    pool: Extension<PgPool>,
    payload: Option<Json<ApplyRequest>>,
) -> impl IntoResponse {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    // Format check runs first, so an absent email also answers here.
    if !request.email.as_deref().map_or(false, valid_email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid email format" })),
        )
            .into_response();
    }

    let (Some(first_name), Some(last_name), Some(email), Some(services)) = (
        request.first_name,
        request.last_name,
        request.email,
        request.services,
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Missing fields" })),
        )
            .into_response();
    };

    let services = match serde_json::to_string(&services) {
        Ok(services) => services,
        Err(err) => {
            error!("Failed to serialize services: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": err.to_string() })),
            )
                .into_response();
        }
    };

    if let Err(err) = insert_application(
        &pool,
        &first_name,
        &last_name,
        &email,
        request.phone.as_deref().unwrap_or_default(),
        request.country.as_deref().unwrap_or_default(),
        &services,
        request.notes.as_deref().unwrap_or_default(),
    )
    .await
    {
        error!("Application insert failed: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
