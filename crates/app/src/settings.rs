//! Handles settings for the application. Configuration is written in
//! `settings.toml`; every key has a default so the binary runs without one.

use std::collections::HashMap;

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level passed to the tracing env filter.
    pub level: String,
    /// Directory holding the sheet CSV files.
    pub data_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    /// Product name → image filename table, injected into the engine.
    #[serde(default)]
    pub catalog: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.data_dir", "data")?
            .add_source(File::with_name("settings").required(false))
            .build()?;

        settings.try_deserialize()
    }
}
