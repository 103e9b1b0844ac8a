use anyhow::{bail, Context, Result};
use std::env;

#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `TELEGRAM_TOKEN` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let telegram_token = env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN must be set")?;
        if telegram_token.trim().is_empty() {
            bail!("TELEGRAM_TOKEN must not be empty");
        }

        Ok(Self {
            telegram_token,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok().map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_token", &"[REDACTED]")
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}
