//! Member authentication: login, logout, session lookup and email
//! verification.
//!
//! Sessions are opaque random tokens persisted with a 7-day absolute
//! expiry and carried in an `HttpOnly` cookie. Password digests are
//! unsalted SHA-256 hex for compatibility with the stored credential
//! format. Credential failures share one generic message; account-state
//! failures answer with their own.

pub mod login;
pub mod logout;
pub mod me;
pub mod verify_email;

pub(crate) mod session;
mod state;
mod storage;
pub(crate) mod types;
mod utils;

#[cfg(test)]
mod tests;

pub use state::AuthConfig;
