//! POST `/api/login`.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::session::session_cookie;
use super::state::AuthConfig;
use super::storage::{insert_session, lookup_member_credentials, touch_last_login};
use super::types::LoginRequest;
use super::utils::{hash_password, normalize_email};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set"),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account inactive or email unverified"),
        (status = 500, description = "Login failed")
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let (email, password) = match payload {
        Some(Json(LoginRequest {
            email: Some(email),
            password: Some(password),
        })) => (email, password),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Email and password are required." })),
            )
                .into_response()
        }
    };

    let email = normalize_email(&email);

    let member = match lookup_member_credentials(&pool, &email).await {
        Ok(member) => member,
        Err(err) => {
            error!("Login lookup failed: {err}");
            return login_failed();
        }
    };

    // Same body for unknown email and wrong password: no account enumeration.
    let Some(member) = member else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password." })),
        )
            .into_response();
    };

    // Account-state checks come before the digest comparison.
    if member.status != "active" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "This account is inactive." })),
        )
            .into_response();
    }

    if !member.is_verified {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Please verify your email before logging in." })),
        )
            .into_response();
    }

    if hash_password(password.expose_secret()) != member.password_hash {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password." })),
        )
            .into_response();
    }

    let token = match insert_session(&pool, member.member_id, config.session_ttl_seconds()).await
    {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to create session: {err}");
            return login_failed();
        }
    };

    if let Err(err) = touch_last_login(&pool, member.member_id).await {
        error!("Failed to update last login: {err}");
        return login_failed();
    }

    let cookie = match session_cookie(&config, &token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return login_failed();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    (
        StatusCode::OK,
        headers,
        Json(json!({ "success": true, "message": "Login successful." })),
    )
        .into_response()
}

fn login_failed() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Login failed." })),
    )
        .into_response()
}
