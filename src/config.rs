use std::fmt;

use thiserror::Error;
use url::Url;

use crate::constants::{DEFAULT_HOST, DEFAULT_MAIL_API_BASE, DEFAULT_PORT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Process-wide settings, built once at start-up and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Mail provider credentials and the fixed notification addresses.
#[derive(Clone)]
pub struct MailConfig {
    pub api_base: Url,
    pub account_id: String,
    pub api_token: String,
    pub sender: String,
    pub notify_to: String,
}

// keep the token out of logs
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_base", &self.api_base.as_str())
            .field("account_id", &self.account_id)
            .field("api_token", &"<redacted>")
            .field("sender", &self.sender)
            .field("notify_to", &self.notify_to)
            .finish()
    }
}

/// Log filter directive: `RUST_LOG` when set, otherwise `default`. Read after
/// `.env` is loaded so a `RUST_LOG` line there takes effect.
pub fn log_directive<F>(lookup: F, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };

        let api_base_raw = get("MAIL_API_BASE").unwrap_or_else(|| DEFAULT_MAIL_API_BASE.to_string());
        let api_base = Url::parse(api_base_raw.trim()).map_err(|e| ConfigError::Invalid {
            key: "MAIL_API_BASE",
            reason: e.to_string(),
        })?;

        let mail = MailConfig {
            api_base,
            account_id: require("MAIL_ACCOUNT_ID")?,
            api_token: require("MAIL_API_TOKEN")?,
            sender: require("MAIL_SENDER")?,
            notify_to: require("MAIL_NOTIFY_TO")?,
        };

        Ok(Config { server, mail })
    }
}
