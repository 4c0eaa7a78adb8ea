// src/config.rs
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the generation service client.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter. `None` still lets requests go out.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Outbound request timeout, `None` when disabled.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                                      |
    /// |-----------------------|----------------------------------------------|
    /// | `PORT`                | `5000`                                       |
    /// | `GEMINI_API_KEY`      | unset                                        |
    /// | `GEMINI_BASE_URL`     | `https://generativelanguage.googleapis.com`  |
    /// | `GEMINI_MODEL`        | `gemini-2.5-flash`                           |
    /// | `GEMINI_TIMEOUT_SECS` | `30` (`0` disables the timeout)              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "GEMINI_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let gemini = GeminiConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        };

        Ok(Self { port, gemini })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
