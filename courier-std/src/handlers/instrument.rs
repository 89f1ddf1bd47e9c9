//! Span instrumentation for handler phases.

use courier_core::{BoxError, Coordination, RequestHandler, ServiceMessage};

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// A handler wrapper that runs each phase inside a `tracing` span.
///
/// With the `tracing` feature disabled this is a transparent pass-through.
pub struct TracingHandler<H> {
    inner: H,
    service: &'static str,
}

impl<H> TracingHandler<H> {
    /// Wrap `inner`, labelling its spans with `service`.
    pub const fn new(inner: H, service: &'static str) -> Self {
        Self { inner, service }
    }

    /// The service label.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: RequestHandler> RequestHandler for TracingHandler<H> {
    #[cfg(feature = "tracing")]
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        let span = tracing::info_span!(
            "handler_phase",
            service = %self.service,
            phase = "coordinate"
        );
        self.inner.coordinate().instrument(span).await
    }

    #[cfg(not(feature = "tracing"))]
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        self.inner.coordinate().await
    }

    #[cfg(feature = "tracing")]
    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        let span = tracing::info_span!(
            "handler_phase",
            service = %self.service,
            phase = "process"
        );
        self.inner.process().instrument(span).await
    }

    #[cfg(not(feature = "tracing"))]
    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        self.inner.process().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedError, ScriptedHandler};

    #[tokio::test]
    async fn test_tracing_handler_passthrough() {
        let script = ScriptedHandler::new(ServiceMessage::new("facebook").with_text("hi"))
            .with_coordination(Coordination::challenge("42"));
        let probe = script.probe();
        let handler = TracingHandler::new(script, "facebook");

        assert_eq!(handler.service(), "facebook");
        assert_eq!(handler.coordinate().await.unwrap().body(), "42");
        assert_eq!(
            handler.process().await.unwrap().message.as_deref(),
            Some("hi")
        );
        assert_eq!(probe.coordinated(), 1);
        assert_eq!(probe.processed(), 1);
    }

    #[tokio::test]
    async fn test_tracing_handler_keeps_errors() {
        let script = ScriptedHandler::new(ServiceMessage::new("sms")).failing_process("boom");
        let handler = TracingHandler::new(script, "sms");

        let err = handler.process().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScriptedError>(),
            Some(&ScriptedError("boom".into()))
        );
    }
}
