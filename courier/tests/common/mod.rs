//! Shared handlers and controllers for integration tests.

#![allow(dead_code)]

use courier::{
    BoxError, Controller, Coordination, FromRequest, Headers, Params, RequestHandler,
    ServiceMessage, ServiceRegistry,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub const VERIFY_TOKEN: &str = "open-sesame";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChannelError {
    #[error("verification token mismatch")]
    BadToken,
    #[error("missing param `{0}`")]
    MissingParam(&'static str),
}

fn param_str<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

// ============================================================================
// Facebook-like handler
// ============================================================================

/// Answers `hub.challenge` on coordination and reads `text`/`sender` on
/// processing.
pub struct FacebookHandler {
    params: Params,
}

impl FromRequest for FacebookHandler {
    fn from_request(params: &Params, _headers: &Headers) -> Result<Self, BoxError> {
        Ok(Self {
            params: params.clone(),
        })
    }
}

impl RequestHandler for FacebookHandler {
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        match param_str(&self.params, "hub.verify_token") {
            Some(VERIFY_TOKEN) => {
                let challenge = param_str(&self.params, "hub.challenge").unwrap_or_default();
                Ok(Coordination::challenge(challenge))
            }
            _ => Err(ChannelError::BadToken.into()),
        }
    }

    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        let text = param_str(&self.params, "text").ok_or(ChannelError::MissingParam("text"))?;
        let mut message = ServiceMessage::new("facebook").with_text(text);
        if let Some(sender) = param_str(&self.params, "sender") {
            message = message.with_sender(sender);
        }
        Ok(message)
    }
}

// ============================================================================
// SMS handler
// ============================================================================

/// Requires a `From` param at construction time.
pub struct SmsHandler {
    from: String,
    body: String,
}

impl FromRequest for SmsHandler {
    fn from_request(params: &Params, _headers: &Headers) -> Result<Self, BoxError> {
        let from = param_str(params, "From").ok_or(ChannelError::MissingParam("From"))?;
        Ok(Self {
            from: from.to_string(),
            body: param_str(params, "Body").unwrap_or_default().to_string(),
        })
    }
}

impl RequestHandler for SmsHandler {
    async fn coordinate(&self) -> Result<Coordination, BoxError> {
        Ok(Coordination::ok())
    }

    async fn process(&self) -> Result<ServiceMessage, BoxError> {
        Ok(ServiceMessage::new("twilio")
            .with_sender(self.from.clone())
            .with_text(self.body.clone()))
    }
}

pub fn registry() -> ServiceRegistry {
    ServiceRegistry::builder()
        .register_type::<FacebookHandler>("Facebook")
        .register_type::<SmsHandler>("Twilio")
        .build()
        .unwrap()
}

// ============================================================================
// Controllers
// ============================================================================

/// Replies with the message text and records what it routed.
pub struct BotController {
    message: ServiceMessage,
    log: Arc<Mutex<Vec<ServiceMessage>>>,
}

impl Controller for BotController {
    type Output = String;

    async fn route(self) -> Result<String, BoxError> {
        let reply = format!(
            "{} says: {}",
            self.message.sender_id.as_deref().unwrap_or("someone"),
            self.message.message.as_deref().unwrap_or_default()
        );
        self.log.lock().unwrap().push(self.message);
        Ok(reply)
    }
}

/// A closure-based controller factory sharing one log.
pub fn bot_controllers() -> (
    impl Fn(ServiceMessage) -> BotController + Send + Sync + 'static,
    Arc<Mutex<Vec<ServiceMessage>>>,
) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let shared = log.clone();
    let factory = move |message: ServiceMessage| BotController {
        message,
        log: shared.clone(),
    };
    (factory, log)
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
