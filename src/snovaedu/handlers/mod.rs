pub mod auth;
pub mod health;
pub mod leads;

// common functions for the handlers
use regex::Regex;
use tracing::{info_span, Span};

/// Lightweight email sanity check used before persisting form data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Span carrying the query metadata attached to every database call.
pub(crate) fn db_span(operation: &str, statement: &str) -> Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}
