use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load the shared settings.
    ///
    /// Precedence, lowest first: the conventional `PORT` variable, an optional
    /// `configuration` file, then `APP__*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let fallback_port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(i64::from(default_port()));

        let config = Cfg::builder()
            .set_default("port", fallback_port)?
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
