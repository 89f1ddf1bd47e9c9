pub(crate) mod dispatcher;
pub(crate) mod gateway;

pub use dispatcher::Dispatcher;
pub use gateway::{Gateway, GatewayError};
