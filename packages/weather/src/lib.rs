#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather widget core.
//!
//! Resolves a position through a [`geolocation::Geolocator`] (falling back
//! to Londrina when positioning is denied, unsupported or too slow), asks a
//! [`providers::WeatherProvider`] for the current conditions there, and
//! reports the result as a [`fetcher::FetchOutcome`] that the page turns
//! into a [`WeatherDisplay`].
//!
//! The production provider is
//! [`providers::openweathermap::OpenWeatherMapProvider`], configured by
//! [`config::ProviderConfig`].

pub mod config;
pub mod fetcher;
pub mod geolocation;
pub mod loading;
pub mod providers;

pub use gazeta_weather_models::{
    ConditionCategory, CoordinateSource, Coordinates, FALLBACK_COORDINATES, FetchState,
    GeolocationError, WeatherDisplay, WeatherQuery, WeatherReading,
};

use thiserror::Error;

/// Errors from fetching weather data.
///
/// None of these reach the reader: the fetcher logs them and the widget
/// shows its "unavailable" placeholder instead.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned status {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response was missing a required field.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
