//! Environment-sourced configuration for the two services.
//!
//! Everything is read from `FOLIO_*` variables; only the store URL has no
//! default. Secrets (the Telegram bot token) are never hardcoded — when the
//! Telegram variables are unset the notifier is simply disabled.

use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// The links record id the original deployment wrote its contact links and
/// admin credentials under. Part of the stored data, not a secret.
pub const DEFAULT_LINKS_KEY: &str = "-OOvwHeVJtSsrjh3QnWR";

/// A required environment variable that was not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVar(pub &'static str);

impl fmt::Display for MissingVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "environment variable {} is not set", self.0)
    }
}

impl Error for MissingVar {}

/// Telegram notifier settings; both parts are required for it to be on.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Process configuration shared by the site and admin binaries.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the document store.
    pub store_url: String,
    /// Bind address of the public site.
    pub site_addr: String,
    /// Bind address of the admin dashboard.
    pub admin_addr: String,
    /// Public URL of the admin dashboard, for the site's edit redirect.
    pub admin_url: String,
    /// Push id of the fixed links record.
    pub links_key: String,
    /// Site owner's display name.
    pub owner_name: String,
    /// Fallback tagline when the store holds no skills yet.
    pub owner_tagline: String,
    /// Where uploaded resumes are written and served from.
    pub resume_dir: PathBuf,
    /// Where uploaded certification images are written.
    pub image_dir: PathBuf,
    /// Contact-form notification settings, when configured.
    pub telegram: Option<TelegramConfig>,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, MissingVar> {
        let store_url = env::var("FOLIO_STORE_URL").map_err(|_| MissingVar("FOLIO_STORE_URL"))?;

        let telegram = match (
            env::var("FOLIO_TELEGRAM_BOT_TOKEN"),
            env::var("FOLIO_TELEGRAM_CHAT_ID"),
        ) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Ok(Config {
            store_url,
            site_addr: var_or("FOLIO_SITE_ADDR", "127.0.0.1:8080"),
            admin_addr: var_or("FOLIO_ADMIN_ADDR", "127.0.0.1:8081"),
            admin_url: var_or("FOLIO_ADMIN_URL", "http://127.0.0.1:8081"),
            links_key: var_or("FOLIO_LINKS_KEY", DEFAULT_LINKS_KEY),
            owner_name: var_or("FOLIO_OWNER_NAME", "Portfolio Owner"),
            owner_tagline: var_or("FOLIO_OWNER_TAGLINE", "Web Developer, Cloud Enthusiast"),
            resume_dir: PathBuf::from(var_or("FOLIO_RESUME_DIR", "static/resume")),
            image_dir: PathBuf::from(var_or("FOLIO_IMAGE_DIR", "static/assets/img/portfolio")),
            telegram,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_url_is_an_error() {
        // Don't touch the real environment; exercise the display instead.
        let err = MissingVar("FOLIO_STORE_URL");
        assert_eq!(err.to_string(), "environment variable FOLIO_STORE_URL is not set");
    }

    #[test]
    fn var_or_falls_back() {
        assert_eq!(var_or("FOLIO_SURELY_UNSET_VARIABLE", "fallback"), "fallback");
    }
}
