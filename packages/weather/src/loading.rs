//! Loading indicator bookkeeping.
//!
//! The widget's refresh button spins while a provider call is in flight.
//! [`LoadingTracker::acquire`] hands out a [`LoadingGuard`] before the call
//! and the guard clears the indicator when dropped, so every exit path
//! (success, error, panic unwinding) releases it exactly once. Overlapping
//! fetches share one indicator: it turns on with the first in-flight call
//! and off when the last one settles. The count and the indicator change
//! happen under one lock, so a hide from a settling call can never land
//! after a show from a call that started in the meantime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Something that can show or hide a loading state.
pub trait LoadingIndicator: Send + Sync {
    /// Shows (`true`) or hides (`false`) the loading state.
    fn set_loading(&self, loading: bool);
}

/// Indicator that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndicator;

impl LoadingIndicator for NoopIndicator {
    fn set_loading(&self, _loading: bool) {}
}

/// Counts in-flight calls and drives a [`LoadingIndicator`].
pub struct LoadingTracker {
    indicator: Arc<dyn LoadingIndicator>,
    in_flight: Mutex<usize>,
}

impl LoadingTracker {
    /// Creates a tracker with nothing in flight.
    #[must_use]
    pub fn new(indicator: Arc<dyn LoadingIndicator>) -> Self {
        Self {
            indicator,
            in_flight: Mutex::new(0),
        }
    }

    /// Marks a call as in flight until the returned guard is dropped.
    #[must_use]
    pub fn acquire(&self) -> LoadingGuard<'_> {
        let mut in_flight = self.lock();
        *in_flight += 1;
        if *in_flight == 1 {
            self.indicator.set_loading(true);
        }
        drop(in_flight);

        LoadingGuard { tracker: self }
    }

    /// Number of calls currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    fn release(&self) {
        let mut in_flight = self.lock();
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.indicator.set_loading(false);
        }
    }

    // A panicking indicator must not wedge later fetches.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new(Arc::new(NoopIndicator))
    }
}

/// Releases its in-flight slot on drop.
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.release();
    }
}
