use anyhow::{bail, Context, Result};
use std::time::Duration;

/// Default pause between two remote calls of a bulk run
pub const DEFAULT_PACING_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct Config {
    // Trigger endpoint
    pub endpoint: String,
    pub username: Option<String>,
    pub app_password: Option<String>,
    pub nonce: Option<String>,
    pub request_timeout: Duration,

    // Workflow
    pub default_language: String,
    pub pacing_interval: Duration,

    // Diagnostics
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Trigger endpoint
            endpoint: std::env::var("RETRANSLATE_ENDPOINT")
                .context("RETRANSLATE_ENDPOINT not set")?,
            username: non_empty_var("RETRANSLATE_USERNAME"),
            app_password: non_empty_var("RETRANSLATE_APP_PASSWORD"),
            nonce: non_empty_var("RETRANSLATE_NONCE"),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),

            // Workflow
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            pacing_interval: Duration::from_millis(
                std::env::var("PACING_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_PACING_INTERVAL_MS),
            ),

            // Diagnostics
            debug: std::env::var("RETRANSLATE_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the combinations `from_env` cannot express through defaults alone
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            bail!(
                "RETRANSLATE_ENDPOINT must be an http(s) URL, got '{}'",
                self.endpoint
            );
        }

        match (&self.username, &self.app_password) {
            (Some(_), None) => bail!("RETRANSLATE_USERNAME is set but RETRANSLATE_APP_PASSWORD is not"),
            (None, Some(_)) => bail!("RETRANSLATE_APP_PASSWORD is set but RETRANSLATE_USERNAME is not"),
            _ => {}
        }

        if self.default_language.trim().is_empty() {
            bail!("DEFAULT_LANGUAGE must not be empty");
        }

        Ok(())
    }

    /// Directive for the tracing filter; the debug flag opens up lifecycle events
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "retranslate=debug"
        } else {
            "retranslate=info"
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
