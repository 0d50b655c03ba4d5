use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Default model for event extraction
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default port for the web server
pub const DEFAULT_PORT: u16 = 3000;

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI API key used by the completion service
    pub openai_api_key: String,
    /// Model name passed to the completion service
    pub openai_model: String,
    /// Port the web server listens on
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // The API key is the only required variable
        let openai_api_key =
            env::var("OPENAI_API_KEY").map_err(|_| env_error("OPENAI_API_KEY"))?;

        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| config_error(&format!("Invalid PORT value: {value}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            openai_api_key,
            openai_model,
            port,
        })
    }
}
