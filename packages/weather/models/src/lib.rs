#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather widget types.
//!
//! Covers the coordinate the widget asks about ([`WeatherQuery`]), the
//! reading parsed from the provider ([`WeatherReading`]), the icon
//! taxonomy derived from the provider's condition codes
//! ([`ConditionCategory`]), and what the page finally shows
//! ([`WeatherDisplay`]).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Coordinates used whenever live geolocation is unavailable (Londrina, PR).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: -23.2927,
    longitude: -51.1732,
};

/// City text shown when no reading is available.
pub const UNAVAILABLE_CITY: &str = "Não disponível";

/// Temperature text shown when no reading is available.
pub const UNAVAILABLE_TEMPERATURE: &str = "--°C";

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where the coordinates of a [`WeatherQuery`] came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoordinateSource {
    /// The reader's device reported its position.
    Geolocated,
    /// Geolocation failed and [`FALLBACK_COORDINATES`] were substituted.
    Fallback,
}

/// The position a single fetch asks the provider about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    /// Position to look up.
    pub coordinates: Coordinates,
    /// Whether the position is live or the fallback.
    pub source: CoordinateSource,
}

impl WeatherQuery {
    /// A query for a position reported by geolocation.
    #[must_use]
    pub const fn geolocated(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            source: CoordinateSource::Geolocated,
        }
    }

    /// A query for [`FALLBACK_COORDINATES`].
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            coordinates: FALLBACK_COORDINATES,
            source: CoordinateSource::Fallback,
        }
    }
}

/// Why live geolocation did not produce a position.
///
/// Never shown to the reader; the fetcher substitutes the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The reader refused the permission prompt.
    #[error("geolocation permission denied")]
    PermissionDenied,

    /// No position arrived in time.
    #[error("geolocation timed out")]
    Timeout,

    /// The environment has no geolocation support.
    #[error("geolocation unsupported")]
    Unsupported,

    /// Any other positioning failure.
    #[error("geolocation failed: {0}")]
    Other(String),
}

/// Icon category for a provider condition code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditionCategory {
    /// Codes 200-299.
    Thunderstorm,
    /// Codes 300-399.
    Drizzle,
    /// Codes 500-599.
    Rain,
    /// Codes 600-699.
    Snow,
    /// Codes 700-799 (fog, haze, dust).
    Atmosphere,
    /// Code 800.
    Clear,
    /// Codes above 800.
    Clouds,
    /// Anything else.
    Unknown,
}

impl ConditionCategory {
    /// Classifies a provider condition code. Total over all integers.
    #[must_use]
    pub const fn classify(code: i64) -> Self {
        match code {
            200..300 => Self::Thunderstorm,
            300..400 => Self::Drizzle,
            500..600 => Self::Rain,
            600..700 => Self::Snow,
            700..800 => Self::Atmosphere,
            800 => Self::Clear,
            801.. => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    /// Font Awesome class used by the widget icon.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Thunderstorm => "fa-bolt",
            Self::Drizzle => "fa-cloud-rain",
            Self::Rain => "fa-cloud-showers-heavy",
            Self::Snow => "fa-snowflake",
            Self::Atmosphere => "fa-smog",
            Self::Clear => "fa-sun",
            Self::Clouds => "fa-cloud",
            Self::Unknown => "fa-question-circle",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Thunderstorm,
            Self::Drizzle,
            Self::Rain,
            Self::Snow,
            Self::Atmosphere,
            Self::Clear,
            Self::Clouds,
            Self::Unknown,
        ]
    }
}

/// Rounds a provider temperature the way the widget always has: halves
/// round up (`-2.5` becomes `-2`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_temperature(celsius: f64) -> i32 {
    (celsius + 0.5).floor() as i32
}

/// Current conditions for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Temperature in whole degrees Celsius.
    pub temperature_celsius: i32,
    /// Provider's name for the nearest city.
    pub city_name: String,
    /// Localized condition description (e.g. "céu limpo").
    pub description: String,
    /// Provider condition code.
    pub condition_code: i64,
}

impl WeatherReading {
    /// Icon category of this reading.
    #[must_use]
    pub const fn category(&self) -> ConditionCategory {
        ConditionCategory::classify(self.condition_code)
    }
}

/// Lifecycle of one fetch invocation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    /// Waiting for a position.
    Locating,
    /// Waiting for the provider.
    Fetching,
    /// A reading was produced.
    Succeeded,
    /// The provider call failed.
    Failed,
}

impl FetchState {
    /// Whether the invocation has settled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// What the widget currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WeatherDisplay {
    /// No fetch has settled yet.
    #[default]
    Pending,
    /// The latest fetch succeeded.
    Reading(WeatherReading),
    /// The latest fetch failed.
    ///
    /// Temperature and city switch to placeholders; the description and
    /// icon keep whatever was shown before.
    Unavailable {
        /// Description left over from the previous display, if any.
        description: Option<String>,
        /// Icon left over from the previous display, if any.
        category: Option<ConditionCategory>,
    },
}

impl WeatherDisplay {
    /// The display after a failed fetch, given what was shown before.
    #[must_use]
    pub fn unavailable_after(previous: &Self) -> Self {
        Self::Unavailable {
            description: previous.description_text().map(ToOwned::to_owned),
            category: previous.category(),
        }
    }

    /// Temperature text, e.g. `"24°C"`, or the placeholder.
    #[must_use]
    pub fn temperature_text(&self) -> String {
        match self {
            Self::Reading(reading) => format!("{}°C", reading.temperature_celsius),
            Self::Pending | Self::Unavailable { .. } => UNAVAILABLE_TEMPERATURE.to_string(),
        }
    }

    /// City text, or the placeholder.
    #[must_use]
    pub fn city_text(&self) -> &str {
        match self {
            Self::Reading(reading) => &reading.city_name,
            Self::Pending | Self::Unavailable { .. } => UNAVAILABLE_CITY,
        }
    }

    /// Description text, if any is shown.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        match self {
            Self::Reading(reading) => Some(&reading.description),
            Self::Unavailable { description, .. } => description.as_deref(),
            Self::Pending => None,
        }
    }

    /// Icon category, if any is shown.
    #[must_use]
    pub const fn category(&self) -> Option<ConditionCategory> {
        match self {
            Self::Reading(reading) => Some(reading.category()),
            Self::Unavailable { category, .. } => *category,
            Self::Pending => None,
        }
    }

    /// Whether the display signals a degraded state.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> WeatherReading {
        WeatherReading {
            temperature_celsius: 24,
            city_name: "Londrina".to_string(),
            description: "céu limpo".to_string(),
            condition_code: 800,
        }
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(ConditionCategory::classify(199), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::classify(200), ConditionCategory::Thunderstorm);
        assert_eq!(ConditionCategory::classify(299), ConditionCategory::Thunderstorm);
        assert_eq!(ConditionCategory::classify(300), ConditionCategory::Drizzle);
        assert_eq!(ConditionCategory::classify(450), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::classify(500), ConditionCategory::Rain);
        assert_eq!(ConditionCategory::classify(600), ConditionCategory::Snow);
        assert_eq!(ConditionCategory::classify(741), ConditionCategory::Atmosphere);
        assert_eq!(ConditionCategory::classify(800), ConditionCategory::Clear);
        assert_eq!(ConditionCategory::classify(801), ConditionCategory::Clouds);
        assert_eq!(ConditionCategory::classify(950), ConditionCategory::Clouds);
        assert_eq!(ConditionCategory::classify(-1), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::classify(i64::MIN), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::classify(i64::MAX), ConditionCategory::Clouds);
    }

    #[test]
    fn every_category_has_a_distinct_icon() {
        let mut icons: Vec<&str> = ConditionCategory::all()
            .iter()
            .map(|c| c.icon_class())
            .collect();
        icons.sort_unstable();
        icons.dedup();
        assert_eq!(icons.len(), ConditionCategory::all().len());
    }

    #[test]
    fn rounds_like_the_widget() {
        assert_eq!(round_temperature(23.4), 23);
        assert_eq!(round_temperature(23.5), 24);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.51), -3);
    }

    #[test]
    fn fallback_query_uses_londrina() {
        let query = WeatherQuery::fallback();
        assert_eq!(query.source, CoordinateSource::Fallback);
        assert!((query.coordinates.latitude - -23.2927).abs() < f64::EPSILON);
        assert!((query.coordinates.longitude - -51.1732).abs() < f64::EPSILON);
    }

    #[test]
    fn reading_display_texts() {
        let display = WeatherDisplay::Reading(reading());
        assert_eq!(display.temperature_text(), "24°C");
        assert_eq!(display.city_text(), "Londrina");
        assert_eq!(display.description_text(), Some("céu limpo"));
        assert_eq!(display.category(), Some(ConditionCategory::Clear));
    }

    #[test]
    fn unavailable_replaces_temperature_and_city_only() {
        let previous = WeatherDisplay::Reading(reading());
        let display = WeatherDisplay::unavailable_after(&previous);
        assert!(display.is_unavailable());
        assert_eq!(display.temperature_text(), "--°C");
        assert_eq!(display.city_text(), "Não disponível");
        assert_eq!(display.description_text(), Some("céu limpo"));
        assert_eq!(display.category(), Some(ConditionCategory::Clear));
    }

    #[test]
    fn unavailable_after_pending_has_nothing_left_over() {
        let display = WeatherDisplay::unavailable_after(&WeatherDisplay::Pending);
        assert_eq!(display.description_text(), None);
        assert_eq!(display.category(), None);
    }

    #[test]
    fn fetch_state_terminality() {
        assert!(!FetchState::Idle.is_terminal());
        assert!(!FetchState::Fetching.is_terminal());
        assert!(FetchState::Succeeded.is_terminal());
        assert!(FetchState::Failed.is_terminal());
        assert_eq!(FetchState::Locating.to_string(), "locating");
    }

    #[test]
    fn display_serializes_with_state_tag() {
        let json = serde_json::to_value(WeatherDisplay::unavailable_after(&WeatherDisplay::Pending))
            .unwrap();
        assert_eq!(json["state"], "unavailable");
    }
}
