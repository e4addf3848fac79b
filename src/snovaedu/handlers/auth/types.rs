//! Request/response types for the auth endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[schema(value_type = String)]
    pub password: Option<SecretString>,
}

#[derive(ToSchema, Deserialize, Debug)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

/// Member projection returned by `/api/me`.
#[derive(ToSchema, Serialize, Debug)]
pub struct MemberResponse {
    pub member_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub is_verified: bool,
    pub last_login_at: Option<String>,
}
