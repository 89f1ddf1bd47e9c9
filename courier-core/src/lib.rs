//! # courier-core
//!
//! Core contracts for the Courier service-dispatch router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! service handler crates and controllers that don't need the registry or
//! dispatcher implementations.
//!
//! # The Dispatch Contract
//!
//! An inbound [`DispatchRequest`] names a service. Courier resolves that name
//! to a service-specific [`RequestHandler`], builds it fresh from the
//! request's params and headers, and drives it through two phases:
//!
//! ## Coordination ([`RequestHandler::coordinate`])
//!
//! Channel handshakes and verification before any content is trusted. The
//! resulting [`Coordination`] is what the transport answers with. Some
//! transports only ever coordinate (platform verification pings).
//!
//! ## Processing ([`RequestHandler::process`])
//!
//! Normalizes the platform payload into a [`ServiceMessage`], which is bound
//! to a downstream [`Controller`] and routed to business logic.
//!
//! # Error Types
//!
//! - [`ServiceNotRecognized`] - The requested service has no handler
//! - [`DispatchError`] - Resolution or construction failed
//! - [`RegistryError`] - Registration problems at start-up
//! - [`BoxError`] - Opaque collaborator errors, passed through untouched

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod controller;
mod coordination;
mod error;
mod handler;
mod message;
mod phase;
mod request;
mod service;

// Re-exports
pub use controller::{Controller, ControllerFactory, RouteOutput};
pub use coordination::Coordination;
pub use error::{BoxError, DispatchError, RegistryError, ServiceNotRecognized};
pub use handler::{
    BoxRequestHandler, DynRequestHandler, FromRequest, HandlerFactory, RequestHandler, construct,
};
pub use message::{Attachment, Location, ServiceMessage};
pub use phase::Phase;
pub use request::{DispatchRequest, Headers, Params};
pub use service::{canonicalize, is_canonical};
