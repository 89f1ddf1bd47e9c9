//! The per-request dispatcher.
//!
//! A [`Dispatcher`] owns one freshly built request handler and drives it
//! through the two dispatch phases:
//!
//! ```text
//! new ──► Constructed ──coordinate()*──► Coordinated ──process()──► Processed
//!   │
//!   └─ ServiceNotRecognized / Construction error: no dispatcher at all
//! ```
//!
//! Coordination and processing are independent entry points; transports
//! call whichever they need. Nothing is enforced about their order.

use courier_core::{
    BoxError, BoxRequestHandler, Controller, ControllerFactory, Coordination, DispatchError,
    DispatchRequest, Headers, Params, Phase, RouteOutput,
};
use courier_std::registry::ServiceRegistry;
use std::{fmt, sync::Arc};

/// Drives one request through resolution, coordination and processing.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = Dispatcher::new(&registry, controllers, request)?;
///
/// // Webhook verification, answered synchronously.
/// let reply = dispatcher.coordinate().await?;
///
/// // Normalize and hand off to business logic.
/// let routed = dispatcher.process().await?;
/// ```
pub struct Dispatcher<C> {
    service: String,
    handler_name: String,
    params: Params,
    headers: Headers,
    handler: BoxRequestHandler,
    controllers: Arc<C>,
    phase: Phase,
}

impl<C: ControllerFactory> Dispatcher<C> {
    /// Resolve the request's service and build its handler.
    ///
    /// Fails with [`DispatchError::ServiceNotRecognized`] when the service is
    /// not registered, and with [`DispatchError::Construction`] when the
    /// handler's constructor fails.
    pub fn new(
        registry: &ServiceRegistry,
        controllers: Arc<C>,
        request: DispatchRequest,
    ) -> Result<Self, DispatchError> {
        let (service, params, headers) = request.into_parts();
        let resolved = registry.resolve(&service)?;
        let handler = resolved
            .construct(&params, &headers)
            .map_err(DispatchError::Construction)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(service = %service, handler = %resolved.name(), "dispatcher constructed");

        Ok(Self {
            handler_name: resolved.name().to_string(),
            service,
            params,
            headers,
            handler,
            controllers,
            phase: Phase::Constructed,
        })
    }

    /// Run the handler's coordination phase.
    ///
    /// Every call invokes the handler; the result, including any error, is
    /// returned exactly as the handler produced it.
    pub async fn coordinate(&mut self) -> Result<Coordination, BoxError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(service = %self.service, "coordinating");

        let result = self.handler.coordinate_dyn().await;
        self.phase = self.phase.advance(Phase::Coordinated);
        result
    }

    /// Run the handler's processing phase and route the resulting message.
    ///
    /// The handler's message is bound, unmodified, to a fresh controller and
    /// the controller's result is returned. If the handler fails, no
    /// controller is built and the handler's error is returned.
    pub async fn process(&mut self) -> Result<RouteOutput<C>, BoxError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(service = %self.service, "processing");

        let processed = self.handler.process_dyn().await;
        self.phase = self.phase.advance(Phase::Processed);

        let controller = self.controllers.bind(processed?);
        controller.route().await
    }

    /// The service identifier exactly as requested.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The canonical name the handler is registered under.
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// The request parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// How far this dispatcher has been driven.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl<C> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("service", &self.service)
            .field("handler_name", &self.handler_name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
