//! # Downstream Controllers
//!
//! A controller is bound to exactly one [`ServiceMessage`] and routes it to
//! business logic. The dispatcher builds one per processed request through a
//! [`ControllerFactory`] and returns whatever [`Controller::route`] returns.

use crate::{error::BoxError, message::ServiceMessage};
use std::future::Future;

/// Routes one normalized message to business logic.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot route service messages",
    label = "missing `Controller` implementation",
    note = "Controllers must implement `route`."
)]
pub trait Controller: Send + 'static {
    /// The value handed back to the transport after routing.
    type Output: Send + 'static;

    /// Route the bound message.
    fn route(self) -> impl Future<Output = Result<Self::Output, BoxError>> + Send;
}

/// Binds a controller to a message.
///
/// Any `Fn(ServiceMessage) -> C` where `C: Controller` is a factory.
pub trait ControllerFactory: Send + Sync + 'static {
    /// The controller type produced.
    type Controller: Controller;

    /// Build the controller for `message`.
    fn bind(&self, message: ServiceMessage) -> Self::Controller;
}

impl<F, C> ControllerFactory for F
where
    F: Fn(ServiceMessage) -> C + Send + Sync + 'static,
    C: Controller,
{
    type Controller = C;

    fn bind(&self, message: ServiceMessage) -> C {
        (self)(message)
    }
}

/// Shorthand for the routed output of a factory's controllers.
pub type RouteOutput<F> = <<F as ControllerFactory>::Controller as Controller>::Output;
