//! Tower integration for courier.
//!
//! Exposes the two gateway phases as tower [`Service`]s, so transports built
//! on tower (hyper, axum, tonic) can stack their usual middleware in front of
//! dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use courier::tower::ProcessService;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .concurrency_limit(64)
//!     .service(ProcessService::new(gateway));
//! ```

use crate::orchestrator::{Gateway, GatewayError};
use courier_core::{ControllerFactory, Coordination, DispatchRequest, RouteOutput};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use ::tower::Service;

// ============================================================================
// Coordination
// ============================================================================

/// Runs the coordination phase for each request.
pub struct CoordinateService<C> {
    gateway: Gateway<C>,
}

impl<C> CoordinateService<C> {
    /// Create a new `CoordinateService` over the given gateway.
    pub fn new(gateway: Gateway<C>) -> Self {
        Self { gateway }
    }

    /// Get a reference to the inner gateway.
    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }
}

impl<C> Clone for CoordinateService<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<C: ControllerFactory> Service<DispatchRequest> for CoordinateService<C> {
    type Response = Coordination;
    type Error = GatewayError;
    type Future = BoxFuture<'static, Result<Coordination, GatewayError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DispatchRequest) -> Self::Future {
        let gateway = self.gateway.clone();
        Box::pin(async move { gateway.coordinate(request).await })
    }
}

// ============================================================================
// Processing
// ============================================================================

/// Runs the processing phase for each request and yields the routed result.
pub struct ProcessService<C> {
    gateway: Gateway<C>,
}

impl<C> ProcessService<C> {
    /// Create a new `ProcessService` over the given gateway.
    pub fn new(gateway: Gateway<C>) -> Self {
        Self { gateway }
    }

    /// Get a reference to the inner gateway.
    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }
}

impl<C> Clone for ProcessService<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<C: ControllerFactory> Service<DispatchRequest> for ProcessService<C> {
    type Response = RouteOutput<C>;
    type Error = GatewayError;
    type Future = BoxFuture<'static, Result<RouteOutput<C>, GatewayError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DispatchRequest) -> Self::Future {
        let gateway = self.gateway.clone();
        Box::pin(async move { gateway.process(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Headers, Params, ServiceMessage};
    use courier_std::{
        registry::ServiceRegistry,
        testing::{RecordingControllers, ScriptedHandler},
    };

    fn gateway() -> (Gateway<RecordingControllers>, RecordingControllers) {
        let script = ScriptedHandler::new(ServiceMessage::new("facebook").with_text("hi"))
            .with_coordination(Coordination::challenge("1158201444"));
        let registry = ServiceRegistry::builder()
            .register("Facebook", script.factory())
            .build()
            .unwrap();
        let controllers = RecordingControllers::new();
        (Gateway::new(registry, controllers.clone()), controllers)
    }

    fn request(service: &str) -> DispatchRequest {
        DispatchRequest::new(service, Params::new(), Headers::new())
    }

    #[tokio::test]
    async fn test_coordinate_service_call() {
        let (gateway, _) = gateway();
        let mut service = CoordinateService::new(gateway);

        let reply = service.call(request("facebook")).await.unwrap();
        assert_eq!(reply.body(), "1158201444");
    }

    #[tokio::test]
    async fn test_process_service_call() {
        let (gateway, controllers) = gateway();
        let mut service = ProcessService::new(gateway);

        assert_eq!(service.call(request("Facebook")).await.unwrap(), 1);
        assert!(service.call(request("myspace")).await.unwrap_err().is_client_fault());
        assert_eq!(controllers.received()[0].message.as_deref(), Some("hi"));
    }
}
