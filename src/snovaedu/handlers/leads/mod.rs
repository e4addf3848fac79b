//! Lead-capture form handlers.
//!
//! Four append-only endpoints behind the public site forms. They share a
//! contract: email format first, required fields second, one insert with a
//! server-assigned timestamp, `{"success":true}` on 200.

pub mod apply;
pub mod consultation;
pub mod register;
pub mod unlock;

mod storage;
pub(crate) mod types;
