//! Weather data provider abstraction and implementations.

pub mod openweathermap;

use gazeta_weather_models::{Coordinates, WeatherReading};

use crate::WeatherError;

/// Trait for current-conditions providers.
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current reading for a position.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the request fails, the provider answers
    /// with a non-success status, or the payload is malformed.
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReading, WeatherError>;
}
