//! Site presentation settings.
//!
//! Loaded from `gazeta.toml`; every key is optional:
//!
//! ```toml
//! edition_number = 4
//! loading_screen_delay_ms = 500
//! sidebar_enabled = false
//! card_animation_step_ms = 100
//! weather_config = "config/openweathermap.toml"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;
use serde::Deserialize;
use thiserror::Error;

/// Default location of the site configuration file.
pub const DEFAULT_SITE_CONFIG_PATH: &str = "gazeta.toml";

/// Errors from loading the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`SiteConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Presentation settings that used to differ between script revisions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Current edition number shown in the banner.
    pub edition_number: u32,
    /// How long the loading screen stays up after the page is ready.
    pub loading_screen_delay_ms: u64,
    /// Whether the page has a sidebar toggle.
    pub sidebar_enabled: bool,
    /// Stagger between consecutive news card fade-ins.
    pub card_animation_step_ms: u64,
    /// Weather provider configuration overriding the built-in one.
    pub weather_config: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            edition_number: 4,
            loading_screen_delay_ms: 500,
            sidebar_enabled: false,
            card_animation_step_ms: 100,
            weather_config: None,
        }
    }
}

impl SiteConfig {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads settings from `path`, or returns the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No site config at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Banner text for the current edition, e.g. `"Edição nº 04 – 2025"`.
    #[must_use]
    pub fn edition_banner(&self, year: i32) -> String {
        format!("Edição nº {:02} – {year}", self.edition_number)
    }

    /// How long the loading screen stays up.
    #[must_use]
    pub const fn loading_screen_delay(&self) -> Duration {
        Duration::from_millis(self.loading_screen_delay_ms)
    }

    /// Fade-in delay of the card at `position`.
    #[must_use]
    pub const fn card_animation_delay(&self, position: u64) -> Duration {
        Duration::from_millis(self.card_animation_step_ms.saturating_mul(position))
    }
}

/// The current calendar year in local time, shown in the footer.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
