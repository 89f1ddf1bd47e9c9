//! # courier-std
//!
//! Standard implementations for the Courier service-dispatch router.
//!
//! This crate provides:
//! - **Resolution**: [`ServiceRegistry`], [`ServiceRegistryBuilder`]
//! - **Collected registrations**: `register_service!` (feature `inventory`)
//! - **Handler wrappers**: [`TracingHandler`], `TimeoutHandler` (feature `timeout`)
//! - **Testing utilities**: [`testing`]
//!
//! [`ServiceRegistry`]: registry::ServiceRegistry
//! [`ServiceRegistryBuilder`]: registry::ServiceRegistryBuilder
//! [`TracingHandler`]: handlers::TracingHandler

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use courier_core;

// Modules
pub mod handlers;
pub mod registry;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
