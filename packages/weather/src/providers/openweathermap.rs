//! OpenWeatherMap current weather client.
//!
//! Issues one `GET` per fetch:
//!
//! ```text
//! {base_url}?lat={lat}&lon={lon}&units=metric&lang=pt_br&appid={API_KEY}
//! ```
//!
//! and reads `main.temp`, `name`, `weather[0].description` and
//! `weather[0].id` from the JSON response.
//!
//! See <https://openweathermap.org/current>

use gazeta_weather_models::{Coordinates, WeatherReading, round_temperature};

use super::WeatherProvider;
use crate::WeatherError;
use crate::config::ProviderConfig;

/// OpenWeatherMap API provider.
pub struct OpenWeatherMapProvider {
    config: ProviderConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenWeatherMapProvider {
    /// Creates a provider with a client honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig, api_key: String) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(config, api_key, client))
    }

    /// Creates a provider around an existing HTTP client.
    #[must_use]
    pub const fn with_client(
        config: ProviderConfig,
        api_key: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            api_key,
            client,
        }
    }

    /// Builds the request URL for a position.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if the configured base URL is invalid.
    pub fn request_url(&self, coordinates: Coordinates) -> Result<reqwest::Url, WeatherError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        reqwest::Url::parse_with_params(
            &self.config.base_url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", self.config.units.as_str()),
                ("lang", self.config.lang.as_str()),
                ("appid", self.api_key.as_str()),
            ],
        )
        .map_err(|e| WeatherError::Config {
            message: format!("invalid base_url '{}': {e}", self.config.base_url),
        })
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReading, WeatherError> {
        let url = self.request_url(coordinates)?;

        log::debug!(
            "Requesting weather for lat={} lon={}",
            coordinates.latitude,
            coordinates.longitude
        );

        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let text = resp.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        parse_response(&body)
    }
}

/// Parses an OpenWeatherMap current weather response.
///
/// # Errors
///
/// Returns [`WeatherError::Parse`] if any required field is missing or has
/// the wrong type.
pub fn parse_response(body: &serde_json::Value) -> Result<WeatherReading, WeatherError> {
    let temp = body
        .pointer("/main/temp")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing main.temp in weather response".to_string(),
        })?;

    let city_name = body
        .get("name")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing name in weather response".to_string(),
        })?;

    let description = body
        .pointer("/weather/0/description")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing weather[0].description in weather response".to_string(),
        })?;

    let condition_code = body
        .pointer("/weather/0/id")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing weather[0].id in weather response".to_string(),
        })?;

    Ok(WeatherReading {
        temperature_celsius: round_temperature(temp),
        city_name: city_name.to_string(),
        description: description.to_string(),
        condition_code,
    })
}

#[cfg(test)]
mod tests {
    use gazeta_weather_models::{ConditionCategory, FALLBACK_COORDINATES};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn londrina_body() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": -51.1732, "lat": -23.2927 },
            "weather": [{
                "id": 803,
                "main": "Clouds",
                "description": "nublado",
                "icon": "04d"
            }],
            "main": { "temp": 27.62, "feels_like": 28.1, "humidity": 54 },
            "name": "Londrina",
            "cod": 200
        })
    }

    fn provider_for(base_url: String) -> OpenWeatherMapProvider {
        let config = ProviderConfig {
            base_url,
            request_timeout_secs: 5,
            ..ProviderConfig::default()
        };
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        OpenWeatherMapProvider::with_client(config, "test-key".to_string(), client)
    }

    /// Serves a single canned HTTP response and hands back the request line.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{addr}/data/2.5/weather"), handle)
    }

    #[test]
    fn parses_current_weather() {
        let reading = parse_response(&londrina_body()).unwrap();
        assert_eq!(reading.temperature_celsius, 28);
        assert_eq!(reading.city_name, "Londrina");
        assert_eq!(reading.description, "nublado");
        assert_eq!(reading.condition_code, 803);
        assert_eq!(reading.category(), ConditionCategory::Clouds);
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        for pointer in ["main", "name", "weather"] {
            let mut body = londrina_body();
            body.as_object_mut().unwrap().remove(pointer);
            assert!(
                matches!(parse_response(&body), Err(WeatherError::Parse { .. })),
                "removing {pointer} should fail"
            );
        }

        let mut empty_weather = londrina_body();
        empty_weather["weather"] = serde_json::json!([]);
        assert!(matches!(
            parse_response(&empty_weather),
            Err(WeatherError::Parse { .. })
        ));
    }

    #[test]
    fn wrongly_typed_fields_are_parse_errors() {
        let mut body = londrina_body();
        body["main"]["temp"] = serde_json::json!("27.6");
        assert!(matches!(
            parse_response(&body),
            Err(WeatherError::Parse { .. })
        ));
    }

    #[test]
    fn request_url_carries_all_parameters() {
        let provider = provider_for("https://api.openweathermap.org/data/2.5/weather".to_string());
        let url = provider.request_url(FALLBACK_COORDINATES).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?lat=-23.2927&lon=-51.1732&units=metric&lang=pt_br&appid=test-key"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let provider = provider_for("not a url".to_string());
        assert!(matches!(
            provider.request_url(FALLBACK_COORDINATES),
            Err(WeatherError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn fetches_and_parses_over_http() {
        let (base_url, server) = serve_once("200 OK", londrina_body().to_string()).await;
        let provider = provider_for(base_url);

        let reading = provider.fetch(FALLBACK_COORDINATES).await.unwrap();
        assert_eq!(reading.city_name, "Londrina");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /data/2.5/weather?lat=-23.2927&lon=-51.1732"));
        assert!(request_line.contains("units=metric&lang=pt_br&appid=test-key"));
    }

    #[tokio::test]
    async fn server_error_status_is_reported() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", "{}".to_string()).await;
        let provider = provider_for(base_url);

        let err = provider.fetch(FALLBACK_COORDINATES).await.unwrap_err();
        assert!(matches!(err, WeatherError::Status(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let (base_url, server) = serve_once("200 OK", "{\"main\":".to_string()).await;
        let provider = provider_for(base_url);

        let err = provider.fetch(FALLBACK_COORDINATES).await.unwrap_err();
        assert!(matches!(err, WeatherError::Json(_)));
        server.await.unwrap();
    }
}
