//! `weather` subcommand.

use std::path::Path;
use std::sync::Arc;

use gazeta_weather::config::ProviderConfig;
use gazeta_weather::fetcher::WeatherFetcher;
use gazeta_weather::geolocation::{FixedGeolocator, Geolocator, UnsupportedGeolocator};
use gazeta_weather::loading::LoadingIndicator;
use gazeta_weather::providers::openweathermap::OpenWeatherMapProvider;
use gazeta_weather::{Coordinates, WeatherDisplay};

/// Reports the loading state through the log, since a terminal has no
/// spinner to toggle.
struct LogIndicator;

impl LoadingIndicator for LogIndicator {
    fn set_loading(&self, loading: bool) {
        if loading {
            log::info!("Fetching weather...");
        } else {
            log::info!("Weather fetch settled");
        }
    }
}

/// Fetches the current weather and prints what the widget would show.
///
/// `position` plays the part of the browser's geolocation answer; without
/// it positioning is treated as unsupported and the fallback city is
/// used.
pub async fn run(
    position: Option<(f64, f64)>,
    api_key: Option<String>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => ProviderConfig::load(path)?,
        None => ProviderConfig::default(),
    };
    let api_key = config.resolve_api_key(api_key)?;
    let geolocation_timeout = config.geolocation_timeout();

    let geolocator: Arc<dyn Geolocator> = match position {
        Some((latitude, longitude)) => {
            Arc::new(FixedGeolocator::new(Coordinates::new(latitude, longitude)))
        }
        None => Arc::new(UnsupportedGeolocator),
    };
    let provider = Arc::new(OpenWeatherMapProvider::new(config, api_key)?);

    let fetcher = WeatherFetcher::new(geolocator, provider)
        .with_loading_indicator(Arc::new(LogIndicator))
        .with_geolocation_timeout(geolocation_timeout);

    let outcome = fetcher.fetch_current().await;
    let display = outcome.apply(&WeatherDisplay::Pending);

    if json {
        println!("{}", serde_json::to_string_pretty(&display)?);
        return Ok(());
    }

    println!("{}", display.temperature_text());
    println!("{}", display.city_text());
    if let Some(description) = display.description_text() {
        println!("{description}");
    }
    if let Some(category) = display.category() {
        println!("{}", category.icon_class());
    }

    Ok(())
}
