//! Auth module tests against a live database.
//!
//! Each test connects to `SNOVAEDU_TEST_DSN` and skips when the variable is
//! not set, so the unit suite stays runnable without an instance. Tables are
//! created on first use and rows carry unique emails/tokens per run.

use super::login::login;
use super::me::me;
use super::state::AuthConfig;
use super::types::{LoginRequest, VerifyEmailQuery};
use super::utils::{generate_session_token, hash_password};
use super::verify_email::verify_email;
use anyhow::{anyhow, Context, Result};
use axum::{
    extract::{Extension, Query},
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::IntoResponse,
};
use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::sync::Arc;
use ulid::Ulid;

async fn test_db() -> Result<Option<PgPool>> {
    let Ok(dsn) = std::env::var("SNOVAEDU_TEST_DSN") else {
        eprintln!("Skipping database test: SNOVAEDU_TEST_DSN is not set");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&dsn)
        .await
        .context("failed to connect test pool")?;

    // Tests run in parallel; serialize table creation on one connection.
    let mut conn = pool.acquire().await.context("failed to acquire connection")?;
    sqlx::query("SELECT pg_advisory_lock(727001)")
        .execute(&mut *conn)
        .await
        .context("failed to take schema lock")?;

    for statement in [
        "CREATE TABLE IF NOT EXISTS members (
            member_id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_verified BOOLEAN NOT NULL DEFAULT FALSE,
            status TEXT NOT NULL DEFAULT 'active',
            role TEXT NOT NULL DEFAULT 'member',
            last_login_at TIMESTAMPTZ
        )",
        "CREATE TABLE IF NOT EXISTS sessions (
            token TEXT NOT NULL UNIQUE,
            member_id BIGINT NOT NULL,
            expires_at TIMESTAMPTZ NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS email_verifications (
            id BIGSERIAL PRIMARY KEY,
            member_id BIGINT NOT NULL,
            token TEXT NOT NULL UNIQUE,
            expires_at TIMESTAMPTZ NOT NULL,
            used BOOLEAN NOT NULL DEFAULT FALSE,
            verified_at TIMESTAMPTZ
        )",
    ] {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .context("failed to create test table")?;
    }

    sqlx::query("SELECT pg_advisory_unlock(727001)")
        .execute(&mut *conn)
        .await
        .context("failed to release schema lock")?;

    Ok(Some(pool))
}

fn auth_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::new(
        "snovaedu.org".to_string(),
        "https://snovaedu.org".to_string(),
    ))
}

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Ulid::new().to_string().to_lowercase())
}

async fn insert_member(
    pool: &PgPool,
    email: &str,
    password: &str,
    is_verified: bool,
) -> Result<i64> {
    let row = sqlx::query(
        "INSERT INTO members (first_name, last_name, email, password_hash, is_verified, status, role)
         VALUES ('Jane', 'Doe', $1, $2, $3, 'active', 'member')
         RETURNING member_id",
    )
    .bind(email)
    .bind(hash_password(password))
    .bind(is_verified)
    .fetch_one(pool)
    .await
    .context("failed to insert test member")?;

    Ok(row.get("member_id"))
}

async fn response_parts(response: axum::response::Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|err| anyhow!("failed to read response body: {err}"))?;
    let body = serde_json::from_slice(&bytes).context("response body is not JSON")?;
    Ok((status, body))
}

#[tokio::test]
async fn login_does_not_reveal_which_credential_failed() -> Result<()> {
    let Some(pool) = test_db().await? else {
        return Ok(());
    };

    let email = unique_email("login");
    insert_member(&pool, &email, "correct horse", true).await?;

    let unknown = login(
        Extension(pool.clone()),
        Extension(auth_config()),
        Some(axum::Json(LoginRequest {
            email: Some(unique_email("nobody")),
            password: Some(SecretString::from("whatever")),
        })),
    )
    .await
    .into_response();

    let wrong = login(
        Extension(pool),
        Extension(auth_config()),
        Some(axum::Json(LoginRequest {
            email: Some(email),
            password: Some(SecretString::from("wrong password")),
        })),
    )
    .await
    .into_response();

    let (unknown_status, unknown_body) = response_parts(unknown).await?;
    let (wrong_status, wrong_body) = response_parts(wrong).await?;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, wrong_body);
    Ok(())
}

#[tokio::test]
async fn expired_session_row_answers_expired_not_missing() -> Result<()> {
    let Some(pool) = test_db().await? else {
        return Ok(());
    };

    let member_id = insert_member(&pool, &unique_email("expired"), "pw", true).await?;
    let token = generate_session_token()?;
    sqlx::query(
        "INSERT INTO sessions (member_id, token, expires_at)
         VALUES ($1, $2, NOW() - INTERVAL '1 hour')",
    )
    .bind(member_id)
    .bind(&token)
    .execute(&pool)
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, format!("session={token}").parse()?);
    let response = me(Extension(pool.clone()), headers).await.into_response();
    let (status, body) = response_parts(response).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session expired.");

    // A token with no row at all gets the other answer.
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        format!("session={}", generate_session_token()?).parse()?,
    );
    let response = me(Extension(pool), headers).await.into_response();
    let (status, body) = response_parts(response).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session not found.");
    Ok(())
}

#[tokio::test]
async fn verify_email_is_idempotent_on_replay() -> Result<()> {
    let Some(pool) = test_db().await? else {
        return Ok(());
    };

    let member_id = insert_member(&pool, &unique_email("verify"), "pw", false).await?;
    let token = generate_session_token()?;
    sqlx::query(
        "INSERT INTO email_verifications (member_id, token, expires_at)
         VALUES ($1, $2, NOW() + INTERVAL '1 hour')",
    )
    .bind(member_id)
    .bind(&token)
    .execute(&pool)
    .await?;

    let call = |pool: PgPool, token: String| async move {
        verify_email(
            Extension(pool),
            Extension(auth_config()),
            Query(VerifyEmailQuery { token: Some(token) }),
        )
        .await
        .into_response()
    };

    let first = call(pool.clone(), token.clone()).await;
    assert_eq!(first.status(), StatusCode::FOUND);
    assert_eq!(
        first.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("https://snovaedu.org/welcome.html?verified=1")
    );

    let state_after = |pool: &PgPool| {
        let pool = pool.clone();
        let token = token.clone();
        async move {
            let row = sqlx::query(
                "SELECT m.is_verified, v.used, v.verified_at
                 FROM email_verifications v
                 JOIN members m ON m.member_id = v.member_id
                 WHERE v.token = $1",
            )
            .bind(&token)
            .fetch_one(&pool)
            .await?;
            anyhow::Ok((
                row.get::<bool, _>("is_verified"),
                row.get::<bool, _>("used"),
                row.get::<Option<DateTime<Utc>>, _>("verified_at"),
            ))
        }
    };

    let (is_verified, used, verified_at) = state_after(&pool).await?;
    assert!(is_verified);
    assert!(used);
    let first_verified_at = verified_at.context("verified_at not set")?;

    // Replaying the link succeeds again and keeps the first timestamp.
    let second = call(pool.clone(), token.clone()).await;
    assert_eq!(second.status(), StatusCode::FOUND);
    assert_eq!(
        second.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("https://snovaedu.org/welcome.html?verified=1")
    );

    let (is_verified, used, verified_at) = state_after(&pool).await?;
    assert!(is_verified);
    assert!(used);
    assert_eq!(verified_at, Some(first_verified_at));
    Ok(())
}

#[tokio::test]
async fn issued_session_expires_seven_days_out() -> Result<()> {
    let Some(pool) = test_db().await? else {
        return Ok(());
    };

    let email = unique_email("ttl");
    insert_member(&pool, &email, "correct horse", true).await?;

    let response = login(
        Extension(pool.clone()),
        Extension(auth_config()),
        Some(axum::Json(LoginRequest {
            email: Some(email),
            password: Some(SecretString::from("correct horse")),
        })),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let token = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .and_then(|v| v.strip_prefix("session="))
        .context("no session cookie in login response")?
        .to_string();

    let row = sqlx::query("SELECT expires_at FROM sessions WHERE token = $1")
        .bind(&token)
        .fetch_one(&pool)
        .await
        .context("issued session not found")?;
    let expires_at: DateTime<Utc> = row.get("expires_at");

    let delta = expires_at - Utc::now();
    assert!(delta > Duration::days(7) - Duration::minutes(1), "ttl too short: {delta}");
    assert!(delta <= Duration::days(7) + Duration::minutes(1), "ttl too long: {delta}");
    Ok(())
}
