//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// Header carrying the client-generated idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Percent-encode `value` as a single URL path segment.
///
/// Only unreserved characters pass through, so `/`, `?` and `#` cannot change
/// the endpoint. Empty and dot segments are rejected since URL parsing would
/// collapse them.
pub fn path_segment(value: &str) -> Result<String, FetchError> {
    if matches!(value, "" | "." | "..") {
        return Err(FetchError::InvalidUrl(format!(
            "invalid path segment: {:?}",
            value
        )));
    }

    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    Ok(out)
}

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A transport-independent description of one request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append query pairs. Repeated keys are kept.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Attach an idempotency key.
    pub fn idempotency_key(self, key: impl Into<String>) -> Self {
        self.header(IDEMPOTENCY_KEY_HEADER, key)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "/orders")
            .json(&serde_json::json!({"name": "Ayu"}))
            .unwrap();
        assert_eq!(req.get_header("content-type"), Some("application/json"));
        assert_eq!(req.body(), Some(br#"{"name":"Ayu"}"#.as_slice()));
    }

    #[test]
    fn test_bearer_and_idempotency_headers() {
        let req = RequestBuilder::new(Method::Post, "/orders")
            .bearer_auth("tok")
            .idempotency_key("key-1");
        assert_eq!(req.get_header("Authorization"), Some("Bearer tok"));
        assert_eq!(req.get_header("idempotency-key"), Some("key-1"));
    }

    #[test]
    fn test_query_keeps_repeated_keys() {
        let req = RequestBuilder::new(Method::Get, "/products")
            .query([("diet", "vegan"), ("diet", "halal")])
            .query(vec![("page".to_string(), "2".to_string())]);
        assert_eq!(req.query_pairs().len(), 3);
        assert_eq!(req.query_pairs()[1], ("diet".into(), "halal".into()));
    }

    #[test]
    fn test_path_segment_escapes_separators() {
        assert_eq!(path_segment("garden-fresh-salad").unwrap(), "garden-fresh-salad");
        assert_eq!(path_segment("a/b?c#d").unwrap(), "a%2Fb%3Fc%23d");
        assert_eq!(path_segment("nasi goreng").unwrap(), "nasi%20goreng");
        assert_eq!(path_segment("es-teh-manis.v2").unwrap(), "es-teh-manis.v2");
    }

    #[test]
    fn test_path_segment_rejects_dot_and_empty() {
        for bad in ["", ".", ".."] {
            assert!(matches!(path_segment(bad), Err(FetchError::InvalidUrl(_))));
        }
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Delete.to_reqwest(), reqwest::Method::DELETE);
    }
}
