//! HTTP request types for the PeopleDoc client library.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the PeopleDoc API.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the PeopleDoc API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and uploading files.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// A file to upload as the `file` part of a multipart request.
///
/// # Example
///
/// ```rust
/// use people_doc::FileUpload;
///
/// let file = FileUpload::new("payslip.pdf", b"%PDF-1.4".to_vec())
///     .content_type("application/pdf");
/// assert_eq!(file.file_name(), "payslip.pdf");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates a new upload from a file name and its contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the MIME type of the file part.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type, if set.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// File contents are elided from debug output.
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The body of a request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document (`application/json`).
    Json(Value),
    /// URL-encoded form fields (`application/x-www-form-urlencoded`).
    Form(Vec<(String, String)>),
    /// A `multipart/form-data` upload with a `file` part and an optional
    /// `data` part holding a JSON document.
    Multipart {
        /// The uploaded file.
        file: FileUpload,
        /// Serialized JSON sent as the `data` part.
        data: Option<String>,
    },
}

/// An HTTP request to be sent to the PeopleDoc API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use people_doc::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "api/v1/employees/")
///     .json(json!({"technical_id": "ABC"}))
///     .build()
///     .unwrap();
///
/// assert!(request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path, relative to the base URL.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Headers added on top of the client's base headers.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if a POST or PUT
    /// request has no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            extra_headers: None,
        }
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Sets a URL-encoded form body.
    #[must_use]
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.body = Some(RequestBody::Form(fields));
        self
    }

    /// Sets a multipart body made of a file and an optional `data` part.
    #[must_use]
    pub fn multipart(mut self, file: FileUpload, data: Option<String>) -> Self {
        self.body = Some(RequestBody::Multipart { file, data });
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "api/v1/employees/42")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "api/v1/employees/42");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_verify_requires_body_for_post() {
        let result = HttpRequest::builder(HttpMethod::Post, "api/v1/employees/").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));
    }

    #[test]
    fn test_verify_requires_body_for_put() {
        let result = HttpRequest::builder(HttpMethod::Put, "api/v2/client/organizations/1").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_builder_with_form_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "api/v2/client/tokens")
            .form([("grant_type", "client_credentials"), ("scope", "client")])
            .build()
            .unwrap();

        assert_eq!(
            request.body,
            Some(RequestBody::Form(vec![
                ("grant_type".to_string(), "client_credentials".to_string()),
                ("scope".to_string(), "client".to_string()),
            ]))
        );
    }

    #[test]
    fn test_builder_with_json_body_and_header() {
        let request = HttpRequest::builder(HttpMethod::Put, "api/v2/client/organizations/1")
            .json(json!({"name": "Org"}))
            .header("X-Custom", "value")
            .build()
            .unwrap();

        assert_eq!(request.body, Some(RequestBody::Json(json!({"name": "Org"}))));
        assert_eq!(
            request.extra_headers.unwrap().get("X-Custom"),
            Some(&"value".to_string())
        );
    }

    #[test]
    fn test_multipart_without_data_is_a_valid_post() {
        let file = FileUpload::new("doc.pdf", vec![1, 2, 3]);
        let request = HttpRequest::builder(HttpMethod::Post, "api/v2/documents")
            .multipart(file, None)
            .build()
            .unwrap();

        assert!(matches!(
            request.body,
            Some(RequestBody::Multipart { data: None, .. })
        ));
    }

    #[test]
    fn test_file_upload_debug_elides_contents() {
        let file = FileUpload::new("doc.pdf", b"secret payload".to_vec());
        let debug = format!("{file:?}");
        assert!(debug.contains("doc.pdf"));
        assert!(!debug.contains("secret payload"));
    }
}
