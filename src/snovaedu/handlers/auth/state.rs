//! Auth configuration shared by the handlers.

const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    site_domain: String,
    base_url: String,
    session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(site_domain: String, base_url: String) -> Self {
        Self {
            site_domain,
            base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    /// Domain attribute of the session cookie.
    #[must_use]
    pub fn site_domain(&self) -> &str {
        &self.site_domain
    }

    /// Public base URL, without trailing slash, for verification redirects.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }
}
