//! # courier - Service Dispatch for Multi-Channel Bots
//!
//! `courier` sits between a transport and a bot's business logic. Every
//! inbound request names the messaging service it came from (`"facebook"`,
//! `"twilio"`, ...). Courier resolves that name against a whitelisted
//! registry, builds the service's request handler, and drives it through
//! coordination and processing. Processed messages are handed to a
//! downstream controller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! let registry = ServiceRegistry::builder()
//!     .register_type::<FacebookHandler>("Facebook")
//!     .register_type::<SmsHandler>("Twilio")
//!     .build()?;
//!
//! let gateway = Gateway::new(registry, |message: ServiceMessage| BotController::new(message));
//!
//! // Webhook verification
//! let reply = gateway.coordinate(DispatchRequest::new("facebook", params, headers)).await?;
//!
//! // Inbound message
//! gateway.process(DispatchRequest::new("facebook", params, headers)).await?;
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing`: structured events for resolution and each dispatch phase
//! - `timeout`: [`handlers::TimeoutHandler`]
//! - `inventory`: distributed registration with `register_service!`
//! - `tower`: the gateway phases as tower services

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod orchestrator;

#[cfg(feature = "tower")]
pub mod tower;

pub use courier_core::{
    // Errors
    BoxError,
    // Handlers
    BoxRequestHandler,
    // Controllers
    Controller,
    ControllerFactory,
    // Coordination
    Coordination,
    DispatchError,
    // Requests
    DispatchRequest,
    DynRequestHandler,
    FromRequest,
    HandlerFactory,
    Headers,
    Params,
    // Lifecycle
    Phase,
    RegistryError,
    RequestHandler,
    RouteOutput,
    // Messages
    Attachment,
    Location,
    ServiceMessage,
    ServiceNotRecognized,
    // Names
    canonicalize,
    is_canonical,
};

pub use orchestrator::{Dispatcher, Gateway, GatewayError};

pub use courier_std::registry::{ResolvedService, ServiceRegistry, ServiceRegistryBuilder};

#[cfg(feature = "inventory")]
pub use courier_std::{register_service, registry::ServiceRegistration};

/// Standard handler wrappers.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::handlers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Controller, ControllerFactory, Coordination, DispatchError, DispatchRequest,
        Dispatcher, FromRequest, Gateway, GatewayError, Headers, Params, RequestHandler,
        ServiceMessage, ServiceNotRecognized, ServiceRegistry,
    };
}

#[cfg(feature = "inventory")]
pub use courier_std::inventory;
