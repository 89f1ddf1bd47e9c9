//! Registrations collected via `inventory`.
//!
//! Handler crates can submit themselves from anywhere in the binary with
//! [`register_service!`](crate::register_service); the application then
//! folds them into a registry with
//! [`ServiceRegistryBuilder::with_collected`].
//!
//! ```rust,ignore
//! courier_std::register_service!("Facebook" => FacebookHandler);
//!
//! let registry = ServiceRegistry::builder().with_collected().build()?;
//! ```

use super::ServiceRegistryBuilder;
use courier_core::{BoxError, BoxRequestHandler, Headers, Params};

/// A service registration submitted to the global collection.
pub struct ServiceRegistration {
    /// Canonical service name.
    pub name: &'static str,
    /// Handler constructor.
    pub construct: fn(&Params, &Headers) -> Result<BoxRequestHandler, BoxError>,
}

impl ServiceRegistration {
    /// Create a registration entry.
    pub const fn new(
        name: &'static str,
        construct: fn(&Params, &Headers) -> Result<BoxRequestHandler, BoxError>,
    ) -> Self {
        Self { name, construct }
    }
}

inventory::collect!(ServiceRegistration);

/// Submit a handler type implementing `RequestHandler + FromRequest` to the
/// global registration collection.
#[macro_export]
macro_rules! register_service {
    ($name:literal => $handler:ty) => {
        $crate::inventory::submit! {
            $crate::registry::ServiceRegistration::new(
                $name,
                $crate::registry::construct::<$handler>,
            )
        }
    };
}

impl ServiceRegistryBuilder {
    /// Add every registration submitted with `register_service!`.
    ///
    /// Collection order is unspecified, so duplicate names among collected
    /// entries are only deterministic without
    /// [`allow_overrides`](Self::allow_overrides), where they fail the build.
    pub fn with_collected(self) -> Self {
        let mut collected: Vec<&ServiceRegistration> =
            inventory::iter::<ServiceRegistration>.into_iter().collect();
        collected.sort_by_key(|reg| reg.name);

        collected
            .into_iter()
            .fold(self, |builder, reg| builder.register_factory(reg.name, reg.construct))
    }

    /// Number of registrations currently submitted to the collection.
    pub fn collected_count() -> usize {
        inventory::iter::<ServiceRegistration>.into_iter().count()
    }
}
