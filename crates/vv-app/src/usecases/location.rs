//! Location-driven use cases.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use vv_core::api::ApiResult;
use vv_core::location::Coordinate;
use vv_core::permission::PermissionError;
use vv_core::places::Weather;
use vv_core::ports::{LocationSourcePort, WeatherPort};

/// Passes a fix through only when it is strictly farther than the threshold
/// from the last fix that passed. The first fix always passes.
#[derive(Debug, Clone)]
pub struct LocationThrottle {
    threshold_meters: f64,
    last_emitted: Option<Coordinate>,
}

impl LocationThrottle {
    pub fn new(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            last_emitted: None,
        }
    }

    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    pub fn should_emit(&mut self, fix: Coordinate) -> bool {
        let emit = match self.last_emitted {
            None => true,
            Some(previous) => previous.distance_to(&fix) > self.threshold_meters,
        };
        if emit {
            self.last_emitted = Some(fix);
        }
        emit
    }

    /// Forget the last emitted fix so the next one passes.
    pub fn reset(&mut self) {
        self.last_emitted = None;
    }
}

/// Refetches weather when the device has moved far enough.
pub struct WeatherRefresher {
    weather: Arc<dyn WeatherPort>,
    throttle: Mutex<LocationThrottle>,
    latest: watch::Sender<Option<Weather>>,
}

impl WeatherRefresher {
    pub fn new(weather: Arc<dyn WeatherPort>, distance_threshold_meters: f64) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            weather,
            throttle: Mutex::new(LocationThrottle::new(distance_threshold_meters)),
            latest,
        }
    }

    /// `Ok(None)` when the fix was throttled and no request was made.
    ///
    /// A failed fetch un-throttles, so the next fix retries.
    pub async fn on_location(&self, fix: Coordinate) -> ApiResult<Option<Weather>> {
        let emit = self
            .throttle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .should_emit(fix);
        if !emit {
            debug!("location change below threshold, skipping weather refresh");
            return Ok(None);
        }

        match self.weather.current_weather(Some(fix)).await {
            Ok(weather) => {
                debug!(temp_f = weather.temp_f, "weather refreshed");
                self.latest.send_replace(Some(weather.clone()));
                Ok(Some(weather))
            }
            Err(err) => {
                self.throttle
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .reset();
                Err(err)
            }
        }
    }

    pub fn latest(&self) -> Option<Weather> {
        self.latest.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Weather>> {
        self.latest.subscribe()
    }

    /// Follow a location stream until it closes.
    pub fn spawn(self: Arc<Self>, mut updates: watch::Receiver<Option<Coordinate>>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let fix = *updates.borrow_and_update();
                if let Some(fix) = fix {
                    if let Err(err) = self.on_location(fix).await {
                        warn!(error = %err, "weather refresh failed");
                    }
                }
                if updates.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

/// One-shot "where am I now", bounded by a timeout.
pub struct CurrentLocation {
    source: Arc<dyn LocationSourcePort>,
    timeout: Duration,
}

impl CurrentLocation {
    pub fn new(source: Arc<dyn LocationSourcePort>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub async fn execute(&self) -> Result<Coordinate, PermissionError> {
        if !self.source.is_authorized() {
            return Err(PermissionError::NotAuthorized);
        }
        match tokio::time::timeout(self.timeout, self.source.request_fix()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "no location fix before timeout");
                Err(PermissionError::Timeout)
            }
        }
    }
}
