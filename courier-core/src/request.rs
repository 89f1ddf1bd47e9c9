//! The inbound dispatch request.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Request parameters: a JSON object, as decoded by the transport.
pub type Params = Map<String, Value>;

/// Request headers with case-insensitive names.
///
/// Names are stored lower-cased; values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: BTreeMap<String, String>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.map
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(lower-cased name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no headers.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// An inbound message addressed to a service.
///
/// Immutable once built. `service` is caller-controlled and is only ever
/// used as a registry key.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    service: String,
    params: Params,
    headers: Headers,
}

impl DispatchRequest {
    /// Create a new request.
    pub fn new(service: impl Into<String>, params: Params, headers: Headers) -> Self {
        Self {
            service: service.into(),
            params,
            headers,
        }
    }

    /// The service identifier, exactly as supplied.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The request parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Split the request into its parts.
    pub fn into_parts(self) -> (String, Params, Headers) {
        (self.service, self.params, self.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_case_insensitive() {
        let headers = Headers::new()
            .with("X-Hub-Signature", "sha1=abc")
            .with("Content-Type", "application/json");

        assert_eq!(headers.get("x-hub-signature"), Some("sha1=abc"));
        assert_eq!(headers.get("X-HUB-SIGNATURE"), Some("sha1=abc"));
        assert!(headers.contains("content-type"));
        assert!(!headers.contains("authorization"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_headers_insert_replaces() {
        let mut headers = Headers::new();
        assert_eq!(headers.insert("Accept", "text/plain"), None);
        assert_eq!(
            headers.insert("ACCEPT", "application/json"),
            Some("text/plain".to_string())
        );
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_headers_from_iter() {
        let headers: Headers = [("A", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_request_parts() {
        let Value::Object(params) = json!({"Body": "hello"}) else {
            unreachable!()
        };
        let request = DispatchRequest::new("twilio", params.clone(), Headers::new());

        assert_eq!(request.service(), "twilio");
        assert_eq!(request.params()["Body"], "hello");
        assert!(request.headers().is_empty());

        let (service, p, h) = request.into_parts();
        assert_eq!(service, "twilio");
        assert_eq!(p, params);
        assert!(h.is_empty());
    }
}
