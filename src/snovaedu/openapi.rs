use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::snovaedu::handlers::{auth, health, leads};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login::login,
        auth::logout::logout,
        auth::me::me,
        auth::verify_email::verify_email,
        leads::apply::apply,
        leads::consultation::consultation,
        leads::unlock::unlock,
        leads::register::register
    ),
    components(schemas(
        auth::types::LoginRequest,
        auth::types::MemberResponse,
        leads::types::ApplyRequest,
        leads::types::ConsultationRequest,
        leads::types::UnlockRequest,
        leads::types::RegisterRequest
    )),
    tags(
        (name = "auth", description = "Session based member authentication"),
        (name = "leads", description = "Lead capture forms"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// axum handler serving the schema document
pub async fn openapi_json() -> impl IntoResponse {
    Json(openapi())
}
