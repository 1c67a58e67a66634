//! Runtime configuration taken from the environment.
//!
//! A `.env` file in the working directory is loaded first when present;
//! variables already set in the process environment win over it.

use log::debug;

use crate::{crm::hatchbuck::DEFAULT_API_BASE, error::ConfigError};

pub const API_KEY_VAR: &str = "HATCHBUCK_APIKEY";
pub const API_URL_VAR: &str = "HATCHBUCK_API_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => debug!("Ignoring unreadable .env file: {err}"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let api_key = non_blank(API_KEY_VAR).ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;
        let api_base = non_blank(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Ok(Self { api_key, api_base })
    }
}
