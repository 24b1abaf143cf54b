//! Weather provider configuration.
//!
//! The default OpenWeatherMap settings live in
//! `config/openweathermap.toml` and are embedded at compile time. A site
//! can point at its own TOML file with the same shape via
//! [`ProviderConfig::load`]. The API key is never stored in the file: it
//! is passed explicitly or read from the environment variable named by
//! `api_key_env`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::WeatherError;

const DEFAULT_CONFIG_TOML: &str = include_str!("../config/openweathermap.toml");

/// Settings for the current-conditions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Unique identifier (e.g., `"openweathermap"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Endpoint URL, without query parameters.
    pub base_url: String,
    /// Unit system requested from the provider.
    #[serde(default = "default_units")]
    pub units: String,
    /// Language of the condition descriptions.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Per-request timeout for the provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long to wait for a position before using the fallback.
    #[serde(default = "default_geolocation_timeout_secs")]
    pub geolocation_timeout_secs: u64,
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "pt_br".to_string()
}

fn default_api_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_geolocation_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if the TOML is malformed or a
    /// required key is missing.
    pub fn from_toml(toml_str: &str) -> Result<Self, WeatherError> {
        toml::de::from_str(toml_str).map_err(|e| WeatherError::Config {
            message: format!("invalid provider configuration: {e}"),
        })
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, WeatherError> {
        let contents = std::fs::read_to_string(path).map_err(|e| WeatherError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Timeout applied to each provider request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timeout applied to each geolocation attempt.
    #[must_use]
    pub const fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }

    /// Picks the API key: the explicit value if given, otherwise the
    /// configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if neither source provides a
    /// non-empty key.
    pub fn resolve_api_key(&self, explicit: Option<String>) -> Result<String, WeatherError> {
        explicit
            .filter(|key| !key.is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.is_empty())
            })
            .ok_or_else(|| WeatherError::Config {
                message: format!(
                    "no API key given and {} environment variable not set",
                    self.api_key_env
                ),
            })
    }
}

impl Default for ProviderConfig {
    /// The embedded OpenWeatherMap configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (covered by tests).
    fn default() -> Self {
        Self::from_toml(DEFAULT_CONFIG_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded weather provider config: {e}"))
    }
}
