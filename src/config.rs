//! Configuration loading from the process environment

use crate::error::{Error, Result};
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "proctord.db";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Process configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
    /// Bearer credential for the completion provider
    pub groq_api_key: String,
    /// Completion provider base URL (overridable for local stubs)
    pub groq_base_url: String,
    /// Completion model identifier
    pub model: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GROQ_API_KEY` is required; everything else falls back to a default.
    /// Failing fast here beats sending an unusable credential on every request.
    pub fn from_env() -> Result<Self> {
        let db_path = std::env::var("PROCTORD_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let port = match std::env::var("PROCTORD_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid PROCTORD_PORT value: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Error::Config("GROQ_API_KEY is not set".to_string()))?;

        let groq_base_url =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("PROCTORD_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Config {
            db_path,
            port,
            groq_api_key,
            groq_base_url,
            model,
        })
    }
}
