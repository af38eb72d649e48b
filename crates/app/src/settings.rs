//! Handles settings for the application. Configuration is written in
//! `settings.toml`; see `settings.toml.example` for the expected keys.
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// Telegram user ids allowed to talk to the bot. Empty means open.
    #[serde(default)]
    pub allowed_users: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub telegram: Telegram,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
