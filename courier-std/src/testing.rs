//! Testing utilities for Courier.
//!
//! This module provides utilities to make testing dispatch flows easier.
//!
//! # Features
//!
//! - [`ScriptedHandler`]: A request handler returning preset results
//! - [`HandlerProbe`]: Shared counters observing a handler's construction and phases
//! - [`RecordingControllers`]: A controller factory that records every routed message
//! - [`ScriptedError`]: A concrete error type for checking pass-through

use courier_core::{
    BoxError, Controller, ControllerFactory, Coordination, Headers, Params, RequestHandler,
    ServiceMessage,
};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

/// A recognizable error raised by the testing collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ScriptedError(pub String);

// ============================================================================
// Handler Probe
// ============================================================================

/// Shared counters for a [`ScriptedHandler`].
///
/// Clones share the same counters, so a probe kept by the test observes
/// every handler built from the same script.
#[derive(Debug, Clone, Default)]
pub struct HandlerProbe {
    constructed: Arc<AtomicUsize>,
    coordinated: Arc<AtomicUsize>,
    processed: Arc<AtomicUsize>,
}

impl HandlerProbe {
    /// Create a probe with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many handlers the factory has built.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    /// How many times `coordinate` ran.
    pub fn coordinated(&self) -> usize {
        self.coordinated.load(Ordering::SeqCst)
    }

    /// How many times `process` ran.
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Scripted Handler
// ============================================================================

/// A request handler that returns preset results.
///
/// # Example
///
/// ```rust,ignore
/// let script = ScriptedHandler::new(ServiceMessage::new("facebook").with_text("hi"));
/// let probe = script.probe();
///
/// let registry = ServiceRegistry::builder()
///     .register("Facebook", script.factory())
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedHandler {
    coordination: Result<Coordination, ScriptedError>,
    message: Result<ServiceMessage, ScriptedError>,
    probe: HandlerProbe,
}

impl ScriptedHandler {
    /// A handler that coordinates with `200 OK` and processes into `message`.
    pub fn new(message: ServiceMessage) -> Self {
        Self {
            coordination: Ok(Coordination::ok()),
            message: Ok(message),
            probe: HandlerProbe::new(),
        }
    }

    /// Coordinate with the given result instead of `200 OK`.
    pub fn with_coordination(mut self, coordination: Coordination) -> Self {
        self.coordination = Ok(coordination);
        self
    }

    /// Fail coordination with a [`ScriptedError`].
    pub fn failing_coordination(mut self, reason: impl Into<String>) -> Self {
        self.coordination = Err(ScriptedError(reason.into()));
        self
    }

    /// Fail processing with a [`ScriptedError`].
    pub fn failing_process(mut self, reason: impl Into<String>) -> Self {
        self.message = Err(ScriptedError(reason.into()));
        self
    }

    /// Report into an existing probe.
    pub fn with_probe(mut self, probe: &HandlerProbe) -> Self {
        self.probe = probe.clone();
        self
    }

    /// The probe shared by this script and every handler built from it.
    pub fn probe(&self) -> HandlerProbe {
        self.probe.clone()
    }

    /// A constructor building a copy of this script per request.
    pub fn factory(
        &self,
    ) -> impl Fn(&Params, &Headers) -> Result<ScriptedHandler, BoxError> + Send + Sync + 'static
    {
        let script = self.clone();
        move |_params: &Params, _headers: &Headers| {
            script.probe.constructed.fetch_add(1, Ordering::SeqCst);
            Ok(script.clone())
        }
    }
}

impl RequestHandler for ScriptedHandler {
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        self.probe.coordinated.fetch_add(1, Ordering::SeqCst);
        self.coordination.clone().map_err(BoxError::from)
    }

    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        self.probe.processed.fetch_add(1, Ordering::SeqCst);
        self.message.clone().map_err(BoxError::from)
    }
}

// ============================================================================
// Recording Controllers
// ============================================================================

/// A controller factory that records every message routed through it.
///
/// Each successful route returns the 1-based sequence number of the message.
///
/// # Example
///
/// ```rust,ignore
/// let controllers = RecordingControllers::new();
/// let gateway = Gateway::new(registry, controllers.clone());
///
/// gateway.process(request).await?;
/// assert_eq!(controllers.received().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingControllers {
    received: Arc<Mutex<Vec<ServiceMessage>>>,
    failure: Option<ScriptedError>,
}

impl RecordingControllers {
    /// Create a factory whose controllers always succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory whose controllers record, then fail.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            received: Arc::default(),
            failure: Some(ScriptedError(reason.into())),
        }
    }

    /// Get a clone of the routed messages.
    pub fn received(&self) -> Vec<ServiceMessage> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of routed messages.
    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// The controller produced by [`RecordingControllers`].
#[derive(Debug)]
pub struct RecordingController {
    message: ServiceMessage,
    received: Arc<Mutex<Vec<ServiceMessage>>>,
    failure: Option<ScriptedError>,
}

impl RecordingController {
    /// The message this controller is bound to.
    pub fn message(&self) -> &ServiceMessage {
        &self.message
    }
}

impl ControllerFactory for RecordingControllers {
    type Controller = RecordingController;

    fn bind(&self, message: ServiceMessage) -> RecordingController {
        RecordingController {
            message,
            received: self.received.clone(),
            failure: self.failure.clone(),
        }
    }
}

impl Controller for RecordingController {
    type Output = usize;

    async fn route(self) -> Result<usize, BoxError> {
        let sequence = {
            let mut received = self
                .received
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            received.push(self.message);
            received.len()
        };

        match self.failure {
            Some(err) => Err(err.into()),
            None => Ok(sequence),
        }
    }
}
