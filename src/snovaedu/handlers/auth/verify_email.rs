//! GET `/api/verify-email`.
//!
//! Finishes the email loop started at registration. Every branch answers
//! with a redirect to the welcome page so the member never sees a JSON
//! body when clicking the link from their inbox.

use axum::{
    extract::{Extension, Query},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::state::AuthConfig;
use super::storage::{lookup_verification, mark_member_verified};
use super::types::VerifyEmailQuery;

#[utoipa::path(
    get,
    path = "/api/verify-email",
    params(
        ("token" = Option<String>, Query, description = "Verification token from the email link")
    ),
    responses(
        (status = 302, description = "Redirect to the welcome page with the verification outcome")
    ),
    tag = "auth"
)]
pub async fn verify_email(
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
    query: Query<VerifyEmailQuery>,
) -> impl IntoResponse {
    let Some(token) = query.token.clone().filter(|t| !t.is_empty()) else {
        return redirect(&config, "verified=0");
    };

    let verification = match lookup_verification(&pool, &token).await {
        Ok(verification) => verification,
        Err(err) => {
            // Lookup errors fail open to the success page, logged here.
            error!("Verification lookup failed: {err}");
            return redirect(&config, "verified=1");
        }
    };

    let Some(verification) = verification else {
        return redirect(&config, "verified=0");
    };

    if verification.expires_at <= Utc::now() {
        return redirect(&config, "expired=1");
    }

    if let Err(err) = mark_member_verified(&pool, verification.member_id, verification.id).await {
        error!("Failed to mark member verified: {err}");
        return redirect(&config, "verified=1");
    }

    redirect(&config, "verified=1")
}

fn redirect(config: &AuthConfig, outcome: &str) -> axum::response::Response {
    let location = format!("{}/welcome.html?{outcome}", config.base_url());
    let mut headers = HeaderMap::new();
    match location.parse() {
        Ok(value) => {
            headers.insert(LOCATION, value);
            (StatusCode::FOUND, headers).into_response()
        }
        Err(err) => {
            error!("Invalid redirect location {location}: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
