//! POST `/api/consultation`.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use super::storage::insert_consultation;
use super::types::ConsultationRequest;
use crate::snovaedu::handlers::valid_email;

#[utoipa::path(
    post,
    path = "/api/consultation",
    request_body = ConsultationRequest,
    responses(
        (status = 200, description = "Consultation request stored"),
        (status = 400, description = "Invalid email or missing fields"),
        (status = 500, description = "Storage failure")
    ),
    tag = "leads"
)]
pub async fn consultation(
    pool: Extension<PgPool>,
    payload: Option<Json<ConsultationRequest>>,
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
            Json(json!({ "success": false, "message": "Missing fields" })),
        )
            .into_response();
    };

    if let Err(err) = insert_consultation(
        &pool,
        &first_name,
        &last_name,
        &email,
        request.phone.as_deref().unwrap_or_default(),
        request.grad_year.as_deref().unwrap_or_default(),
        request.message.as_deref().unwrap_or_default(),
        request.source.as_deref().unwrap_or("homepage"),
    )
    .await
    {
        error!("Consultation insert failed: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
