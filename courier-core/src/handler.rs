//! # Request Handlers
//!
//! A request handler is the service-specific half of a dispatch. It is built
//! fresh for every request from the request's params and headers, and then
//! driven through two independent phases:
//!
//! 1. **Coordination** ([`RequestHandler::coordinate`]): handshakes and
//!    verification before any content is trusted, e.g. answering a webhook
//!    subscription challenge.
//! 2. **Processing** ([`RequestHandler::process`]): normalizing the
//!    platform payload into a [`ServiceMessage`].
//!
//! Transports may call either phase without the other.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`RequestHandler`] uses native `async fn` so concrete handlers are written
//! without boxing. The dispatcher only ever holds a [`BoxRequestHandler`],
//! the object-safe [`DynRequestHandler`] twin, which every `RequestHandler`
//! implements automatically.

use crate::{
    coordination::Coordination,
    error::BoxError,
    message::ServiceMessage,
    request::{Headers, Params},
};
use std::{future::Future, pin::Pin};

/// The service-specific handler contract.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a request handler",
    label = "missing `RequestHandler` implementation",
    note = "Request handlers must implement both `coordinate` and `process`."
)]
pub trait RequestHandler: Send + Sync + 'static {
    /// Perform the coordination phase.
    fn coordinate(&self) -> impl Future<Output = Result<Coordination, BoxError>> + Send;

    /// Normalize the inbound payload.
    fn process(&self) -> impl Future<Output = Result<ServiceMessage, BoxError>> + Send;
}

/// Build a handler from the raw request parts.
///
/// This is the handler's constructor. It may validate eagerly and fail;
/// such failures surface as
/// [`DispatchError::Construction`](crate::DispatchError::Construction).
pub trait FromRequest: Sized {
    /// Construct `Self` for one request.
    fn from_request(params: &Params, headers: &Headers) -> Result<Self, BoxError>;
}

/// Object-safe version of [`RequestHandler`].
pub trait DynRequestHandler: Send + Sync + 'static {
    /// Perform the coordination phase (dynamic dispatch version).
    fn coordinate_dyn<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Coordination, BoxError>> + Send + 'a>>;

    /// Normalize the inbound payload (dynamic dispatch version).
    fn process_dyn<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceMessage, BoxError>> + Send + 'a>>;
}

impl<T: RequestHandler> DynRequestHandler for T {
    fn coordinate_dyn<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Coordination, BoxError>> + Send + 'a>> {
        Box::pin(self.coordinate())
    }

    fn process_dyn<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceMessage, BoxError>> + Send + 'a>> {
        Box::pin(self.process())
    }
}

/// A type-erased, owned request handler.
pub type BoxRequestHandler = Box<dyn DynRequestHandler>;

// Allow an already-boxed handler wherever a `RequestHandler` is expected.
impl RequestHandler for BoxRequestHandler {
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        (**self).coordinate_dyn().await
    }

    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        (**self).process_dyn().await
    }
}

/// Produces a fresh handler for each request.
///
/// Registries store one factory per service. Any
/// `Fn(&Params, &Headers) -> Result<H, BoxError>` is a factory.
pub trait HandlerFactory: Send + Sync + 'static {
    /// Construct a handler for one request.
    fn build(&self, params: &Params, headers: &Headers) -> Result<BoxRequestHandler, BoxError>;
}

impl<F, H> HandlerFactory for F
where
    F: Fn(&Params, &Headers) -> Result<H, BoxError> + Send + Sync + 'static,
    H: RequestHandler,
{
    fn build(&self, params: &Params, headers: &Headers) -> Result<BoxRequestHandler, BoxError> {
        let handler = (self)(params, headers)?;
        Ok(Box::new(handler))
    }
}

/// Construct `H` through its [`FromRequest`] impl and box it.
///
/// Usable as a plain `fn` pointer, e.g. `construct::<Sms>`.
pub fn construct<H>(params: &Params, headers: &Headers) -> Result<BoxRequestHandler, BoxError>
where
    H: RequestHandler + FromRequest,
{
    Ok(Box::new(H::from_request(params, headers)?))
}
