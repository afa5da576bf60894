//! One-shot position capture.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use eco_model::Coordinates;

use crate::error::LocationError;

/// Query options. The defaults ask for a fresh, high-accuracy fix within
/// ten seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return. Zero forces a new fix.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Device positioning capability.
pub trait LocationProvider {
    /// Whether the device can produce a position at all.
    fn is_supported(&self) -> bool;

    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Coordinates, LocationError>>;
}

/// Ask `provider` for one position under the `options.timeout` deadline.
pub async fn locate<P: LocationProvider + ?Sized>(
    provider: &P,
    options: PositionOptions,
) -> Result<Coordinates, LocationError> {
    if !provider.is_supported() {
        return Err(LocationError::Unsupported);
    }
    debug!(timeout_ms = options.timeout.as_millis() as u64, "requesting position");
    let result = match tokio::time::timeout(options.timeout, provider.current_position(options))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout {
            after: options.timeout,
        }),
    };
    if let Err(err) = &result {
        warn!(error = %err, "position request failed");
    }
    result
}

/// Provider that always reports a fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Provider for devices without positioning hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}
