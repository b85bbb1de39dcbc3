use crate::{Lang, parse_lang};
use std::{env, path::PathBuf};
use thiserror::Error;

/// Environment variable holding the Telegram bot token.
pub const TOKEN_VAR: &str = "BOT_TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BOT_TOKEN environment variable is not set")]
    MissingToken,
}

/// Runtime configuration (from environment with sensible defaults)
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub default_lang: Lang,
    /// Directory scanned for `<lang>.json` content overrides.
    pub content_dir: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = get(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let default_lang = match get("DEFAULT_LANG") {
            Some(raw) => parse_lang(raw.trim()).unwrap_or_else(|| {
                tracing::warn!("unknown DEFAULT_LANG {:?}, using zh", raw);
                Lang::Zh
            }),
            None => Lang::Zh,
        };

        let content_dir = get("CONTENT_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("content"));

        Ok(Self {
            bot_token,
            default_lang,
            content_dir,
        })
    }
}
