//! The weather widget's fetch state machine.
//!
//! Each invocation walks `Idle → Locating → Fetching → Succeeded | Failed`.
//! Locating never fails: any geolocation problem substitutes the Londrina
//! fallback. Fetching folds every provider error into
//! [`FetchResult::Failed`], so nothing escapes to the caller.
//!
//! Refreshes are not deduplicated: a second invocation may start while the
//! first is still in flight. Every invocation takes the next value of a
//! monotonic sequence counter, and a response that settles after a newer
//! invocation has started is reported as [`FetchResult::Superseded`]. The
//! most recently issued request therefore always wins, whatever order the
//! responses arrive in.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use gazeta_weather_models::{FetchState, WeatherDisplay, WeatherQuery, WeatherReading};

use crate::WeatherError;
use crate::geolocation::{Geolocator, locate};
use crate::loading::{LoadingIndicator, LoadingTracker};
use crate::providers::WeatherProvider;

/// Default wait for a position before using the fallback.
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// How a fetch invocation ended.
#[derive(Debug)]
pub enum FetchResult {
    /// The provider returned a reading.
    Succeeded(WeatherReading),
    /// The provider call failed.
    Failed(WeatherError),
    /// A newer invocation started before this one settled; its result
    /// must not be displayed.
    Superseded {
        /// How this invocation settled.
        settled: FetchState,
    },
}

/// The result of one invocation, tagged with its sequence number.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Monotonic invocation number (first invocation is 1).
    pub sequence: u64,
    /// The position that was requested.
    pub query: WeatherQuery,
    /// How it ended.
    pub result: FetchResult,
}

impl FetchOutcome {
    /// Terminal state of the invocation.
    #[must_use]
    pub const fn state(&self) -> FetchState {
        match &self.result {
            FetchResult::Succeeded(_) => FetchState::Succeeded,
            FetchResult::Failed(_) => FetchState::Failed,
            FetchResult::Superseded { settled } => *settled,
        }
    }

    /// The reading, if this invocation succeeded and is still current.
    #[must_use]
    pub const fn reading(&self) -> Option<&WeatherReading> {
        match &self.result {
            FetchResult::Succeeded(reading) => Some(reading),
            FetchResult::Failed(_) | FetchResult::Superseded { .. } => None,
        }
    }

    /// Whether a newer invocation replaced this one.
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self.result, FetchResult::Superseded { .. })
    }

    /// What the widget should show after this outcome, given what it
    /// showed before.
    ///
    /// A failure never keeps a stale reading: temperature and city switch
    /// to placeholders. A superseded outcome leaves the display alone.
    #[must_use]
    pub fn apply(&self, previous: &WeatherDisplay) -> WeatherDisplay {
        match &self.result {
            FetchResult::Succeeded(reading) => WeatherDisplay::Reading(reading.clone()),
            FetchResult::Failed(_) => WeatherDisplay::unavailable_after(previous),
            FetchResult::Superseded { .. } => previous.clone(),
        }
    }
}

/// Drives geolocation and the provider call for one widget.
pub struct WeatherFetcher {
    geolocator: Arc<dyn Geolocator>,
    provider: Arc<dyn WeatherProvider>,
    loading: LoadingTracker,
    geolocation_timeout: Duration,
    sequence: AtomicU64,
}

impl WeatherFetcher {
    /// Creates a fetcher with no loading indicator.
    #[must_use]
    pub fn new(geolocator: Arc<dyn Geolocator>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            geolocator,
            provider,
            loading: LoadingTracker::default(),
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            sequence: AtomicU64::new(0),
        }
    }

    /// Drives `indicator` while provider calls are in flight.
    #[must_use]
    pub fn with_loading_indicator(mut self, indicator: Arc<dyn LoadingIndicator>) -> Self {
        self.loading = LoadingTracker::new(indicator);
        self
    }

    /// Overrides how long to wait for a position.
    #[must_use]
    pub const fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Sequence number of the most recently started invocation (0 if none).
    #[must_use]
    pub fn latest_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Locates the reader (or falls back to Londrina) and fetches the
    /// current reading there.
    pub async fn fetch_current(&self) -> FetchOutcome {
        let sequence = self.begin();
        transition(sequence, FetchState::Idle, FetchState::Locating);

        let query = locate(self.geolocator.as_ref(), self.geolocation_timeout).await;
        self.fetch_query(sequence, FetchState::Locating, query).await
    }

    /// Fetches the current reading for a known position, skipping
    /// geolocation.
    pub async fn fetch_at(&self, query: WeatherQuery) -> FetchOutcome {
        let sequence = self.begin();
        self.fetch_query(sequence, FetchState::Idle, query).await
    }

    fn begin(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn fetch_query(
        &self,
        sequence: u64,
        from: FetchState,
        query: WeatherQuery,
    ) -> FetchOutcome {
        transition(sequence, from, FetchState::Fetching);
        log::debug!(
            "[weather #{sequence}] {} position lat={} lon={}",
            query.source,
            query.coordinates.latitude,
            query.coordinates.longitude
        );

        let result = {
            let _loading = self.loading.acquire();
            self.provider.fetch(query.coordinates).await
        };

        let settled = if result.is_ok() {
            FetchState::Succeeded
        } else {
            FetchState::Failed
        };
        transition(sequence, FetchState::Fetching, settled);

        if let Err(e) = &result {
            log::error!("Weather widget error: {e}");
        }

        let latest = self.latest_sequence();
        let result = if latest == sequence {
            match result {
                Ok(reading) => {
                    log::info!(
                        "Weather for {}: {}°C, {}",
                        reading.city_name,
                        reading.temperature_celsius,
                        reading.description
                    );
                    FetchResult::Succeeded(reading)
                }
                Err(e) => FetchResult::Failed(e),
            }
        } else {
            log::debug!("[weather #{sequence}] superseded by #{latest}; discarding result");
            FetchResult::Superseded { settled }
        };

        FetchOutcome {
            sequence,
            query,
            result,
        }
    }
}

fn transition(sequence: u64, from: FetchState, to: FetchState) {
    log::debug!("[weather #{sequence}] {from} -> {to}");
}
