//! Small helpers for credential and session-token handling.

use anyhow::{Context, Result};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Normalize an email for lookup/uniqueness checks.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Digest a plaintext password to the stored credential format.
///
/// Unsalted single-round SHA-256 hex, matching the digests already at
/// rest; login compares the result as a plain string.
pub(super) fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a new session token for the auth cookie.
///
/// 32 bytes from the OS random source, hex-encoded. The raw value is both
/// stored and set in the cookie; the token itself is the credential.
pub(super) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(hex::encode(bytes))
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
