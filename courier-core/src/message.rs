//! The normalized service message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geographic location shared by the sender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment kind as reported by the platform (`image`, `audio`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the attachment can be fetched.
    pub url: String,
}

/// A service-agnostic representation of one inbound message.
///
/// Produced by a handler's `process` phase and handed, untouched, to the
/// downstream controller. The dispatcher never looks inside.
///
/// # Example
///
/// ```rust
/// use courier_core::ServiceMessage;
///
/// let msg = ServiceMessage::new("facebook")
///     .with_sender("8b3e0a3c")
///     .with_text("hi");
/// assert_eq!(msg.message.as_deref(), Some("hi"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMessage {
    /// The service the message arrived on.
    pub service: String,
    /// Platform id of the sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    /// Platform id of the recipient (usually the bot itself).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Quick-reply or postback payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Shared location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Media attachments, in the order the platform sent them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Referral data, kept in the platform's own shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<Value>,
    /// Anything else a handler wants to pass along.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl ServiceMessage {
    /// Create an empty message for a service.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// Set the sender id.
    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Set the target id.
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    /// Set the timestamp in milliseconds.
    pub fn with_timestamp(mut self, millis: u64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    /// Set the message text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Set the postback payload.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Set the shared location.
    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(Location { lat, lng });
        self
    }

    /// Append an attachment.
    pub fn with_attachment(mut self, kind: impl Into<String>, url: impl Into<String>) -> Self {
        self.attachments.push(Attachment {
            kind: kind.into(),
            url: url.into(),
        });
        self
    }

    /// Set the referral data.
    pub fn with_referral(mut self, referral: Value) -> Self {
        self.referral = Some(referral);
        self
    }

    /// Attach an arbitrary extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_sets_fields() {
        let msg = ServiceMessage::new("twilio")
            .with_sender("+15551234567")
            .with_target("+15557654321")
            .with_timestamp(1_700_000_000_000)
            .with_text("hello")
            .with_attachment("image", "https://example.com/cat.png");

        assert_eq!(msg.service, "twilio");
        assert_eq!(msg.sender_id.as_deref(), Some("+15551234567"));
        assert_eq!(msg.target_id.as_deref(), Some("+15557654321"));
        assert_eq!(msg.timestamp, Some(1_700_000_000_000));
        assert_eq!(msg.attachments.len(), 1);
        assert_eq!(msg.attachments[0].kind, "image");
    }

    #[test]
    fn test_serializes_sparse() {
        let msg = ServiceMessage::new("facebook")
            .with_text("hi")
            .with_location(52.5, 13.4);

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "service": "facebook",
                "message": "hi",
                "location": {"lat": 52.5, "lng": 13.4}
            })
        );
    }

    #[test]
    fn test_deserializes_attachment_type() {
        let msg: ServiceMessage = serde_json::from_value(json!({
            "service": "facebook",
            "attachments": [{"type": "audio", "url": "https://example.com/a.mp3"}],
            "extra": {"mid": "m_1"}
        }))
        .unwrap();

        assert_eq!(msg.attachments[0].kind, "audio");
        assert_eq!(msg.extra["mid"], "m_1");
        assert_eq!(msg.message, None);
    }
}
