//! Standard request handler wrappers.
//!
//! Decorators a registration may apply around a concrete handler. The
//! dispatcher never applies them on its own.

pub mod instrument;
#[cfg(feature = "timeout")]
pub mod timeout;

pub use instrument::TracingHandler;
#[cfg(feature = "timeout")]
pub use timeout::{TimeoutError, TimeoutHandler};
