//! # Service Registry
//!
//! The whitelisted map from service names to handler factories.
//!
//! Registrations happen once, at start-up, through [`ServiceRegistryBuilder`].
//! The built [`ServiceRegistry`] is immutable and can be shared across any
//! number of concurrent dispatches without locking.
//!
//! # Resolution
//!
//! Lookups canonicalize the requested identifier with
//! [`canonicalize`](courier_core::canonicalize) (first character upper-cased,
//! the rest lower-cased), so registrations use names already in that form:
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::builder()
//!     .register_type::<FacebookHandler>("Facebook")
//!     .register_type::<SmsHandler>("Twilio")
//!     .build()?;
//!
//! // "facebook", "FACEBOOK" and "Facebook" all resolve to the same entry.
//! let resolved = registry.resolve("facebook")?;
//! assert_eq!(resolved.name(), "Facebook");
//! ```
//!
//! An unknown identifier fails with [`ServiceNotRecognized`], carrying the
//! identifier as supplied. Resolution never constructs a handler; that is an
//! explicit second step through [`ResolvedService::construct`].

#[cfg(feature = "inventory")]
mod collected;

#[cfg(feature = "inventory")]
pub use collected::ServiceRegistration;
pub use courier_core::construct;

use courier_core::{
    BoxError, BoxRequestHandler, FromRequest, HandlerFactory, Headers, Params, RegistryError,
    RequestHandler, ServiceNotRecognized, canonicalize, is_canonical,
};
use std::{collections::HashMap, fmt, sync::Arc};

/// An immutable registry of service handler factories.
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn HandlerFactory>>,
}

impl ServiceRegistry {
    /// Start building a registry.
    pub fn builder() -> ServiceRegistryBuilder {
        ServiceRegistryBuilder::new()
    }

    /// Resolve a service identifier to its registered factory.
    ///
    /// The identifier is canonicalized first. Any miss is reported as
    /// [`ServiceNotRecognized`] with the identifier exactly as given.
    pub fn resolve(&self, service: &str) -> Result<ResolvedService<'_>, ServiceNotRecognized> {
        let key = canonicalize(service);
        match self.services.get_key_value(&key) {
            Some((name, factory)) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(service = %service, handler = %name, "resolved service");

                Ok(ResolvedService {
                    name: name.as_str(),
                    factory: factory.as_ref(),
                })
            }
            None => Err(ServiceNotRecognized::new(service)),
        }
    }

    /// Check whether an identifier would resolve.
    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(&canonicalize(service))
    }

    /// Registered (canonical) service names, sorted.
    pub fn services(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services())
            .finish()
    }
}

/// The outcome of a successful lookup.
///
/// Holds the factory without having built anything yet.
#[derive(Clone, Copy)]
pub struct ResolvedService<'a> {
    name: &'a str,
    factory: &'a dyn HandlerFactory,
}

impl<'a> ResolvedService<'a> {
    /// The canonical name the service is registered under.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The registered factory.
    pub fn factory(&self) -> &'a dyn HandlerFactory {
        self.factory
    }

    /// Build a fresh handler for one request.
    ///
    /// Errors come from the handler's constructor and are returned as-is.
    pub fn construct(
        &self,
        params: &Params,
        headers: &Headers,
    ) -> Result<BoxRequestHandler, BoxError> {
        self.factory.build(params, headers)
    }
}

impl fmt::Debug for ResolvedService<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedService")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`ServiceRegistry`].
pub struct ServiceRegistryBuilder {
    entries: Vec<(String, Arc<dyn HandlerFactory>)>,
    allow_overrides: bool,
}

impl Default for ServiceRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            allow_overrides: false,
        }
    }

    /// Register a constructor function for a service.
    ///
    /// `name` must already be canonical (e.g. `"Facebook"`), otherwise
    /// [`build`](Self::build) fails.
    pub fn register<F, H>(self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&Params, &Headers) -> Result<H, BoxError> + Send + Sync + 'static,
        H: RequestHandler,
    {
        self.register_factory(name, constructor)
    }

    /// Register a handler type through its [`FromRequest`] impl.
    pub fn register_type<H>(self, name: impl Into<String>) -> Self
    where
        H: RequestHandler + FromRequest,
    {
        self.register(name, |params: &Params, headers: &Headers| {
            H::from_request(params, headers)
        })
    }

    /// Register any [`HandlerFactory`].
    pub fn register_factory<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: HandlerFactory,
    {
        let factory: Arc<dyn HandlerFactory> = Arc::new(factory);
        self.entries.push((name.into(), factory));
        self
    }

    /// Let later registrations replace earlier ones with the same name.
    pub fn allow_overrides(mut self) -> Self {
        self.allow_overrides = true;
        self
    }

    /// Validate the registrations and freeze the registry.
    pub fn build(self) -> Result<ServiceRegistry, RegistryError> {
        let allow_overrides = self.allow_overrides;
        let mut services = HashMap::with_capacity(self.entries.len());

        for (name, factory) in self.entries {
            if name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if !is_canonical(&name) {
                return Err(RegistryError::NonCanonicalName {
                    canonical: canonicalize(&name),
                    name,
                });
            }
            if services.insert(name.clone(), factory).is_some() && !allow_overrides {
                return Err(RegistryError::DuplicateService(name));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(services = services.len(), "service registry built");

        Ok(ServiceRegistry { services })
    }
}
