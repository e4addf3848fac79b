//! # SnovaEdu backend
//!
//! HTTP API for the SnovaEdu institutional website plus the shared
//! access-tier library used by its pages.
//!
//! The server side is a set of stateless JSON handlers backed by
//! `PostgreSQL`: member login/logout, session-based "who am I" lookup,
//! email-verification links, and append-only lead-capture forms
//! (apply / consultation / unlock / register).
//!
//! The [`access`] module models the client-side tier system
//! (`visitor < quick < lead < member`): a persisted role store, page and
//! navigation guards, and the upward-only reconciliation against the
//! server's `/api/me` answer.

pub mod access;
pub mod cli;
pub mod snovaedu;
