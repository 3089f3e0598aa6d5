use std::fmt;

use crate::utils::constants::{
    DEFAULT_COMMANDS_SOURCE, DEFAULT_COMPONENTS_SOURCE, DEFAULT_EVENTS_SOURCE,
};
use crate::utils::errors::ConfigError;

/// Catalog location each handler category is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocations {
    pub commands: String,
    pub components: String,
    pub events: String,
}

impl Default for SourceLocations {
    fn default() -> Self {
        Self {
            commands: DEFAULT_COMMANDS_SOURCE.to_string(),
            components: DEFAULT_COMPONENTS_SOURCE.to_string(),
            events: DEFAULT_EVENTS_SOURCE.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub sources: SourceLocations,
}

impl Config {
    /// Read the configuration from the environment, including a `.env` file if present
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let location = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            token,
            sources: SourceLocations {
                commands: location("COMMANDS_SOURCE", DEFAULT_COMMANDS_SOURCE),
                components: location("COMPONENTS_SOURCE", DEFAULT_COMPONENTS_SOURCE),
                events: location("EVENTS_SOURCE", DEFAULT_EVENTS_SOURCE),
            },
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("sources", &self.sources)
            .finish()
    }
}
