//! A shareable front door for transports.
//!
//! [`Gateway`] bundles the registry and the controller factory so a
//! transport (an HTTP route, a queue consumer) only has to hand over a
//! [`DispatchRequest`]. It is cheap to clone; every clone shares the same
//! registry and controllers.

use super::dispatcher::Dispatcher;
use courier_core::{
    BoxError, ControllerFactory, Coordination, DispatchError, DispatchRequest, RouteOutput,
};
use courier_std::registry::ServiceRegistry;
use std::{fmt, sync::Arc};
use thiserror::Error;

/// Errors from a one-shot gateway call.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never reached a handler.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The handler or controller failed.
    #[error(transparent)]
    Handler(BoxError),
}

impl GatewayError {
    /// Whether the caller sent something unroutable.
    pub fn is_client_fault(&self) -> bool {
        match self {
            GatewayError::Dispatch(err) => err.is_client_fault(),
            GatewayError::Handler(_) => false,
        }
    }

    /// Get the handler or controller error, if that is what failed.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            GatewayError::Handler(err) => Some(err),
            GatewayError::Dispatch(_) => None,
        }
    }
}

/// Resolves, constructs and drives dispatchers for incoming requests.
///
/// # Example
///
/// ```rust,ignore
/// let gateway = Gateway::new(registry, BotControllers::default());
///
/// // GET: subscription verification
/// let reply = gateway.coordinate(request).await?;
///
/// // POST: inbound message
/// gateway.process(request).await?;
/// ```
pub struct Gateway<C> {
    registry: Arc<ServiceRegistry>,
    controllers: Arc<C>,
}

impl<C> Clone for Gateway<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            controllers: Arc::clone(&self.controllers),
        }
    }
}

impl<C: ControllerFactory> Gateway<C> {
    /// Create a gateway owning `registry` and `controllers`.
    pub fn new(registry: ServiceRegistry, controllers: C) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(controllers))
    }

    /// Create a gateway from already shared parts.
    pub fn from_shared(registry: Arc<ServiceRegistry>, controllers: Arc<C>) -> Self {
        Self {
            registry,
            controllers,
        }
    }

    /// The registry requests are resolved against.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Build a dispatcher for one request.
    pub fn dispatcher(&self, request: DispatchRequest) -> Result<Dispatcher<C>, DispatchError> {
        Dispatcher::new(&self.registry, Arc::clone(&self.controllers), request)
    }

    /// Resolve the request and run its coordination phase.
    pub async fn coordinate(&self, request: DispatchRequest) -> Result<Coordination, GatewayError> {
        let mut dispatcher = self.dispatcher(request)?;
        dispatcher.coordinate().await.map_err(GatewayError::Handler)
    }

    /// Resolve the request, process it and route the resulting message.
    pub async fn process(&self, request: DispatchRequest) -> Result<RouteOutput<C>, GatewayError> {
        let mut dispatcher = self.dispatcher(request)?;
        dispatcher.process().await.map_err(GatewayError::Handler)
    }
}

impl<C> fmt::Debug for Gateway<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
