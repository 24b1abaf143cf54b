//! Position lookup with the Londrina fallback.

use std::time::Duration;

use gazeta_weather_models::{Coordinates, GeolocationError, WeatherQuery};

/// Source of the reader's current position.
#[async_trait::async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolves the current position or explains why it could not.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError`] if positioning is denied, unsupported
    /// or otherwise fails.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coordinates: Coordinates,
}

impl FixedGeolocator {
    /// Creates a geolocator pinned to `coordinates`.
    #[must_use]
    pub const fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait::async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.coordinates)
    }
}

/// An environment without geolocation support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait::async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Asks `geolocator` for a position, waiting at most `timeout`.
///
/// Any failure, including the timeout, silently degrades to
/// [`WeatherQuery::fallback`]. There is no retry.
pub async fn locate(geolocator: &dyn Geolocator, timeout: Duration) -> WeatherQuery {
    let error = match tokio::time::timeout(timeout, geolocator.current_position()).await {
        Ok(Ok(coordinates)) => return WeatherQuery::geolocated(coordinates),
        Ok(Err(e)) => e,
        Err(_) => GeolocationError::Timeout,
    };

    log::warn!("Could not get location ({error}); using fallback coordinates (Londrina)");
    WeatherQuery::fallback()
}
