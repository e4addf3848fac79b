//! Database helpers for members, sessions and email verification.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;

use crate::snovaedu::handlers::db_span;

use super::types::MemberResponse;
use super::utils::{generate_session_token, is_unique_violation};

/// Fields needed to decide a login attempt.
pub(super) struct MemberCredentials {
    pub(super) member_id: i64,
    pub(super) password_hash: String,
    pub(super) is_verified: bool,
    pub(super) status: String,
}

/// Raw session row. Expiry is checked by the caller so expired and
/// missing sessions can answer differently.
pub(super) struct SessionRow {
    pub(super) member_id: i64,
    pub(super) expires_at: DateTime<Utc>,
}

/// Verification row for an email link token.
pub(super) struct VerificationRow {
    pub(super) id: i64,
    pub(super) member_id: i64,
    pub(super) expires_at: DateTime<Utc>,
}

pub(super) async fn lookup_member_credentials(
    pool: &PgPool,
    email: &str,
) -> Result<Option<MemberCredentials>> {
    let query = r"
        SELECT member_id, password_hash, is_verified, status
        FROM members
        WHERE email = $1
        LIMIT 1
    ";
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(db_span("SELECT", query))
        .await
        .context("failed to lookup member")?;

    Ok(row.map(|row| MemberCredentials {
        member_id: row.get("member_id"),
        password_hash: row.get("password_hash"),
        is_verified: row.get("is_verified"),
        status: row.get("status"),
    }))
}

/// Issue a session: random token persisted with `expires_at = NOW() + ttl`.
/// Retries on the astronomically unlikely token collision.
pub(super) async fn insert_session(
    pool: &PgPool,
    member_id: i64,
    ttl_seconds: i64,
) -> Result<String> {
    let query = r"
        INSERT INTO sessions (member_id, token, expires_at)
        VALUES ($1, $2, NOW() + ($3 * INTERVAL '1 second'))
    ";

    for _ in 0..3 {
        let token = generate_session_token()?;
        let result = sqlx::query(query)
            .bind(member_id)
            .bind(&token)
            .bind(ttl_seconds)
            .execute(pool)
            .instrument(db_span("INSERT", query))
            .await;

        match result {
            Ok(_) => return Ok(token),
            Err(err) if is_unique_violation(&err) => {}
            Err(err) => return Err(err).context("failed to insert session"),
        }
    }

    Err(anyhow!("failed to generate unique session token"))
}

pub(super) async fn touch_last_login(pool: &PgPool, member_id: i64) -> Result<()> {
    let query = r"
        UPDATE members
        SET last_login_at = NOW()
        WHERE member_id = $1
    ";
    sqlx::query(query)
        .bind(member_id)
        .execute(pool)
        .instrument(db_span("UPDATE", query))
        .await
        .context("failed to update last_login_at")?;
    Ok(())
}

pub(super) async fn lookup_session(pool: &PgPool, token: &str) -> Result<Option<SessionRow>> {
    let query = r"
        SELECT member_id, expires_at
        FROM sessions
        WHERE token = $1
        LIMIT 1
    ";
    let row = sqlx::query(query)
        .bind(token)
        .fetch_optional(pool)
        .instrument(db_span("SELECT", query))
        .await
        .context("failed to lookup session")?;

    Ok(row.map(|row| SessionRow {
        member_id: row.get("member_id"),
        expires_at: row.get("expires_at"),
    }))
}

pub(super) async fn delete_session(pool: &PgPool, token: &str) -> Result<()> {
    // Logout is idempotent; it's fine if no rows are deleted.
    let query = "DELETE FROM sessions WHERE token = $1";
    sqlx::query(query)
        .bind(token)
        .execute(pool)
        .instrument(db_span("DELETE", query))
        .await
        .context("failed to delete session")?;
    Ok(())
}

pub(super) async fn fetch_member(
    pool: &PgPool,
    member_id: i64,
) -> Result<Option<MemberResponse>> {
    let query = r#"
        SELECT
            member_id, first_name, last_name, email, role, status, is_verified,
            CASE
                WHEN last_login_at IS NULL THEN NULL
                ELSE to_char(last_login_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"')
            END AS last_login_at
        FROM members
        WHERE member_id = $1
        LIMIT 1
    "#;
    let row = sqlx::query(query)
        .bind(member_id)
        .fetch_optional(pool)
        .instrument(db_span("SELECT", query))
        .await
        .context("failed to fetch member")?;

    Ok(row.map(|row| MemberResponse {
        member_id: row.get("member_id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        role: row.get("role"),
        status: row.get("status"),
        is_verified: row.get("is_verified"),
        last_login_at: row.get("last_login_at"),
    }))
}

pub(super) async fn lookup_verification(
    pool: &PgPool,
    token: &str,
) -> Result<Option<VerificationRow>> {
    let query = r"
        SELECT id, member_id, expires_at
        FROM email_verifications
        WHERE token = $1
        LIMIT 1
    ";
    let row = sqlx::query(query)
        .bind(token)
        .fetch_optional(pool)
        .instrument(db_span("SELECT", query))
        .await
        .context("failed to lookup verification token")?;

    Ok(row.map(|row| VerificationRow {
        id: row.get("id"),
        member_id: row.get("member_id"),
        expires_at: row.get("expires_at"),
    }))
}

/// Mark the member verified and the token used in one transaction.
///
/// Both writes run unconditionally so a replayed link repairs any earlier
/// partial state; `verified_at` keeps the timestamp of the first success.
pub(super) async fn mark_member_verified(
    pool: &PgPool,
    member_id: i64,
    verification_id: i64,
) -> Result<()> {
    let mut tx = pool.begin().await.context("begin verification transaction")?;

    let query = r"
        UPDATE members
        SET is_verified = TRUE
        WHERE member_id = $1
    ";
    sqlx::query(query)
        .bind(member_id)
        .execute(&mut *tx)
        .instrument(db_span("UPDATE", query))
        .await
        .context("failed to mark member verified")?;

    let query = r"
        UPDATE email_verifications
        SET used = TRUE,
            verified_at = COALESCE(verified_at, NOW())
        WHERE id = $1
    ";
    sqlx::query(query)
        .bind(verification_id)
        .execute(&mut *tx)
        .instrument(db_span("UPDATE", query))
        .await
        .context("failed to mark verification used")?;

    tx.commit().await.context("commit verification transaction")?;
    Ok(())
}
