//! Access-tier model shared by the website's pages.
//!
//! Tiers are strictly ordered (`visitor < quick < lead < member`) and gate
//! both direct page loads and navigation links. The browser persists its
//! current tier locally; on every page load the effective tier is
//! reconciled against the server's `/api/me` answer, and a confirmed login
//! always wins.
//!
//! This module is presentation-free: guards return redirect targets and
//! typed denial reasons, and the embedding page decides how to navigate or
//! render a toast. Event suppression for guarded links (capture phase, so
//! bubbling-based workarounds on touch devices do not bypass the check) is
//! likewise the embedder's job.

mod controller;
mod store;
mod tier;

pub use controller::{AccessController, DenyReason, Lang, NavTarget, PageKind};
pub use store::{MemoryStorage, RoleStorage, RoleStore, StorageScope};
pub use tier::{effective_role, Tier};
