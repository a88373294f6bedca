//! Application configuration loaded from a config file and environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Application configuration. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord bot token
    pub token: SecretString,

    /// Command trigger prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Admin user ids keyed by a free-form label
    #[serde(default, alias = "adminIds", alias = "adminids")]
    pub admin_ids: HashMap<String, String>,

    /// Role id to admin level
    #[serde(default)]
    pub levels: HashMap<String, u32>,

    /// Refuse commands whose level is above the invoker's
    #[serde(default, alias = "enforceLevels", alias = "enforcelevels")]
    pub enforce_levels: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// REST request timeout
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_prefix() -> String {
    "!".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_api_base_url() -> String {
    "https://discord.com/api/v10".into()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    /// Load configuration from `config.{json,toml,...}` and `BOT_*` environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("BOT")
                    .prefix_separator("_")
                    .separator("__")
                    // Role ids and user ids must stay strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
