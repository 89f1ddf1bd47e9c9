//! Error types for Courier.
//!
//! This module provides a small error hierarchy using `thiserror`:
//!
//! - [`ServiceNotRecognized`] - The only way an unresolved lookup surfaces
//! - [`DispatchError`] - Errors while building a dispatcher for a request
//! - [`RegistryError`] - Errors while assembling a service registry
//!
//! Errors raised by handlers and controllers are not part of this hierarchy.
//! They travel as [`BoxError`] and are handed back to the caller untouched.

use thiserror::Error;

/// A boxed error type for collaborator (handler / controller) failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The service identifier did not resolve to a registered handler.
///
/// Carries the identifier exactly as the caller supplied it, before
/// canonicalization. Terminal: retrying with the same identifier can never
/// succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The service '{service}' was not recognized.")]
pub struct ServiceNotRecognized {
    service: String,
}

impl ServiceNotRecognized {
    /// Create the error for the given (uncanonicalized) identifier.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// The offending service identifier.
    pub fn service(&self) -> &str {
        &self.service
    }
}

/// Errors that can occur while constructing a dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler is registered for the requested service.
    #[error(transparent)]
    ServiceNotRecognized(#[from] ServiceNotRecognized),

    /// The handler was resolved, but its constructor failed.
    ///
    /// The handler's own error is kept as-is.
    #[error(transparent)]
    Construction(BoxError),
}

impl DispatchError {
    /// Whether the failure was caused by the caller's input.
    ///
    /// Only an unrecognized service is a client fault; constructor failures
    /// belong to the handler.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, DispatchError::ServiceNotRecognized(_))
    }

    /// The unrecognized identifier, if that is what failed.
    pub fn unrecognized_service(&self) -> Option<&str> {
        match self {
            DispatchError::ServiceNotRecognized(err) => Some(err.service()),
            DispatchError::Construction(_) => None,
        }
    }

    /// Recover the handler's constructor error, if that is what failed.
    pub fn into_construction_error(self) -> Option<BoxError> {
        match self {
            DispatchError::Construction(err) => Some(err),
            DispatchError::ServiceNotRecognized(_) => None,
        }
    }
}

/// Errors raised while building a service registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A registration used an empty service name.
    #[error("service name must not be empty")]
    EmptyName,

    /// A registration name can never be produced by canonicalization.
    #[error("service name '{name}' is not canonical (lookups canonicalize to '{canonical}')")]
    NonCanonicalName {
        /// The name as registered.
        name: String,
        /// What lookups canonicalize that name to.
        canonical: String,
    },

    /// Two registrations share a name and overrides are not allowed.
    #[error("service already registered: {0}")]
    DuplicateService(String),
}
