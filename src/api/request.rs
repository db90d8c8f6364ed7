use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ClientError;

/// One file in a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` parts as `(field name, file)`.
    Multipart(Vec<(String, FilePart)>),
}

impl RequestBody {
    /// Whether the default JSON content type applies to this body.
    pub fn is_json_like(&self) -> bool {
        matches!(self, Self::Empty | Self::Json(_))
    }
}

/// Per-call options for [`ApiClient::request`](super::ApiClient::request).
///
/// Header names are case-insensitive; a header set here replaces the client
/// default of the same name.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Serialization(format!("Failed to serialize body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<(String, FilePart)>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Configuration(format!("Invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Configuration(format!("Invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// A fully built request, ready for a [`Transport`](super::Transport).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON. An empty body reads as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body)
            .map_err(|e| ClientError::Serialization(format!("Failed to parse response: {e}")))
    }

    /// Human-readable message from an error body.
    ///
    /// Reads the `detail` field: a string is used as is, a list of validation
    /// entries contributes their `msg` fields. Anything else yields `None`.
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
            serde_json::Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_header_names_are_case_insensitive() {
        let options = RequestOptions::get()
            .header("X-Request-Source", "admin")
            .unwrap();
        assert_eq!(options.headers.get("x-request-source").unwrap(), "admin");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        assert!(RequestOptions::get().header("bad header", "x").is_err());
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::post().json(&json!({ "quantity": 2 })).unwrap();
        assert_eq!(options.body, RequestBody::Json(json!({ "quantity": 2 })));
        assert!(options.body.is_json_like());
        assert!(!RequestBody::Form(vec![]).is_json_like());
    }

    #[test]
    fn test_empty_body_reads_as_null() {
        let response = HttpResponse::new(204, Vec::<u8>::new());
        let value: Option<serde_json::Value> = response.json().unwrap();
        assert!(value.is_none());
        let _: () = response.json().unwrap();
    }

    #[test]
    fn test_error_message_from_detail_string() {
        let response = HttpResponse::new(400, r#"{"detail": "Cart is empty"}"#);
        assert_eq!(response.error_message().as_deref(), Some("Cart is empty"));
    }

    #[test]
    fn test_error_message_from_validation_list() {
        let response = HttpResponse::new(
            422,
            r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"},
                          {"loc": ["body", "password"], "msg": "too short"}]}"#,
        );
        assert_eq!(
            response.error_message().as_deref(),
            Some("field required; too short")
        );
    }

    #[test]
    fn test_error_message_absent() {
        assert_eq!(HttpResponse::new(500, "<html>oops</html>").error_message(), None);
        assert_eq!(HttpResponse::new(500, r#"{"error": "x"}"#).error_message(), None);
        assert_eq!(HttpResponse::new(500, Vec::<u8>::new()).error_message(), None);
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
    }
}
