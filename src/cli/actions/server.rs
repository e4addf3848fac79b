use crate::cli::actions::Action;
use crate::snovaedu::{self, handlers::auth::AuthConfig};
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            site_domain,
            base_url,
        } => {
            // Validate the base URL before connecting anywhere
            Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

            let config = AuthConfig::new(site_domain, base_url);

            snovaedu::new(port, dsn, config).await?;
        }
    }

    Ok(())
}
