//! Inserts for the lead tables. Append-only, `created_at` assigned by the
//! database.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::Instrument;

use crate::snovaedu::handlers::db_span;

pub(super) async fn insert_application(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    country: &str,
    services: &str,
    notes: &str,
) -> Result<()> {
    let statement = "INSERT INTO applications \
         (first_name, last_name, email, phone, country, services, notes, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())";

    let span = db_span("INSERT", statement);

    sqlx::query(statement)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(country)
        .bind(services)
        .bind(notes)
        .execute(pool)
        .instrument(span)
        .await
        .context("Failed to insert application")?;

    Ok(())
}

pub(super) async fn insert_consultation(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    grad_year: &str,
    message: &str,
    source: &str,
) -> Result<()> {
    let statement = "INSERT INTO consultations \
         (first_name, last_name, email, phone, grad_year, message, source, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())";

    let span = db_span("INSERT", statement);

    sqlx::query(statement)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(grad_year)
        .bind(message)
        .bind(source)
        .execute(pool)
        .instrument(span)
        .await
        .context("Failed to insert consultation")?;

    Ok(())
}

pub(super) async fn insert_unlock(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<()> {
    let statement = "INSERT INTO unlocks (first_name, last_name, email, created_at) \
         VALUES ($1, $2, $3, NOW())";

    let span = db_span("INSERT", statement);

    sqlx::query(statement)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .execute(pool)
        .instrument(span)
        .await
        .context("Failed to insert unlock")?;

    Ok(())
}

pub(super) async fn insert_registration(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    referral_code: Option<&str>,
) -> Result<()> {
    let statement =
        "INSERT INTO users (first_name, last_name, email, referral_code, created_at) \
         VALUES ($1, $2, $3, $4, NOW())";

    let span = db_span("INSERT", statement);

    sqlx::query(statement)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(referral_code)
        .execute(pool)
        .instrument(span)
        .await
        .context("Failed to insert registration")?;

    Ok(())
}
