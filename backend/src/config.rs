use std::env;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_PORT: &str = "8081";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub port: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        Ok(Self {
            api_key,
            model,
            port,
        })
    }
}
