//! The result of the coordination phase.

/// What the transport should answer while a handler coordinates.
///
/// Coordination is where a handler performs channel handshakes (webhook
/// verification, subscription challenges) before any content is trusted.
/// The dispatcher returns this value to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordination {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

impl Coordination {
    /// A plain `200 OK`.
    pub fn ok() -> Self {
        Self::new(200, "OK")
    }

    /// A `200` echoing a verification challenge back to the platform.
    pub fn challenge(challenge: impl Into<String>) -> Self {
        Self::new(200, challenge)
    }

    /// An arbitrary status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The HTTP status to answer with.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Extra response headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether the status is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Default for Coordination {
    fn default() -> Self {
        Self::ok()
    }
}
