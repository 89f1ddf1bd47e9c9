//! Timeout wrapper for time-limited handler phases.

use courier_core::{
    BoxError, Coordination, FromRequest, Headers, Params, RequestHandler, ServiceMessage,
};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Error returned when a handler phase runs out of time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{phase} phase timed out after {duration:?}")]
pub struct TimeoutError {
    phase: &'static str,
    duration: Duration,
}

impl TimeoutError {
    /// The phase that ran out of time (`"coordinate"` or `"process"`).
    pub fn phase(&self) -> &'static str {
        self.phase
    }

    /// The duration that was exceeded.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// A handler that bounds each phase of another handler.
///
/// # Example
///
/// ```rust,ignore
/// let registry = ServiceRegistry::builder()
///     .register("Facebook", |params: &Params, headers: &Headers| {
///         Ok(TimeoutHandler::secs(FacebookHandler::from_request(params, headers)?, 5))
///     })
///     .build()?;
/// ```
///
/// # Runtime Requirements
///
/// Uses `tokio::time::timeout` and therefore needs a tokio runtime with the
/// time driver enabled.
pub struct TimeoutHandler<H> {
    inner: H,
    duration: Duration,
}

impl<H> TimeoutHandler<H> {
    /// Create a new `TimeoutHandler` wrapping the given handler.
    pub fn new(inner: H, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Create a `TimeoutHandler` with the timeout specified in seconds.
    pub fn secs(inner: H, seconds: u64) -> Self {
        Self::new(inner, Duration::from_secs(seconds))
    }

    /// Create a `TimeoutHandler` with the timeout specified in milliseconds.
    pub fn millis(inner: H, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the configured timeout duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Build the inner handler from the request, bounded by `duration`.
    pub fn from_request_with(
        params: &Params,
        headers: &Headers,
        duration: Duration,
    ) -> Result<Self, BoxError>
    where
        H: FromRequest,
    {
        Ok(Self::new(H::from_request(params, headers)?, duration))
    }
}

impl<H: RequestHandler> RequestHandler for TimeoutHandler<H> {
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        match timeout(self.duration, self.inner.coordinate()).await {
            Ok(result) => result,
            Err(_) => Err(TimeoutError {
                phase: "coordinate",
                duration: self.duration,
            }
            .into()),
        }
    }

    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        match timeout(self.duration, self.inner.process()).await {
            Ok(result) => result,
            Err(_) => Err(TimeoutError {
                phase: "process",
                duration: self.duration,
            }
            .into()),
        }
    }
}
