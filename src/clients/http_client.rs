//! HTTP client for PeopleDoc API communication.
//!
//! This module provides the [`HttpClient`] type, the request executor shared
//! by both API versions. It sends a request, builds an [`HttpResponse`] and
//! runs it through the configured [`ResponseHandlers`] before handing it
//! back.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{FileUpload, HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::response_handlers::ResponseHandlers;
use crate::config::BaseUrl;

/// Headers whose values are masked in debug logs.
const SENSITIVE_HEADERS: [&str; 2] = ["authorization", "x-api-key"];

/// HTTP client for making requests to the PeopleDoc API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Header merging and body encoding (JSON, form, multipart)
/// - Response classification through its [`ResponseHandlers`]
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use people_doc::clients::{HttpClient, HttpMethod, HttpRequest, ResponseHandlers};
/// use people_doc::BaseUrl;
/// use std::collections::HashMap;
///
/// let base_url = BaseUrl::new("https://api.staging.us.people-doc.com")?;
/// let client = HttpClient::new(base_url, ResponseHandlers::v1(), None)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/v1/employees/42").build()?;
/// let response = client.request(&HashMap::new(), request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://api.staging.us.people-doc.com`).
    base_url: BaseUrl,
    /// Classification rules applied to every response.
    handlers: ResponseHandlers,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(
        base_url: BaseUrl,
        handlers: ResponseHandlers,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            handlers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the response handlers used by this client.
    #[must_use]
    pub const fn handlers(&self) -> &ResponseHandlers {
        &self.handlers
    }

    /// Sends a request and classifies the response.
    ///
    /// `headers` are the caller's base headers; the request's extra headers
    /// are merged on top. Multipart bodies drop any `Content-Type` header so
    /// the transport can set one carrying the part boundary.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The path cannot be resolved against the base URL (`InvalidUrl`)
    /// - Network error occurs (`Network`)
    /// - The response handlers classify the response as a failure (`Api`)
    pub async fn request(
        &self,
        headers: &HashMap<String, String>,
        request: HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path)?;

        let mut headers = headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }
        if matches!(request.body, Some(RequestBody::Multipart { .. })) {
            headers.retain(|key, _| !key.eq_ignore_ascii_case("content-type"));
        }

        tracing::debug!(
            "{} request Url: {}",
            request.http_method.to_string().to_uppercase(),
            url
        );
        tracing::debug!("-- Headers: {:?}", masked_headers(&headers));

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        match request.body {
            Some(RequestBody::Json(body)) => {
                tracing::debug!("-- Payload: {}", body);
                req_builder = req_builder.body(body.to_string());
            }
            Some(RequestBody::Form(fields)) => {
                tracing::debug!("-- Payload: {} form field(s)", fields.len());
                req_builder = req_builder.form(&fields);
            }
            Some(RequestBody::Multipart { file, data }) => {
                tracing::debug!("-- Payload: file {:?}, data {:?}", file, data);
                req_builder = req_builder.multipart(multipart_form(file, data)?);
            }
            None => {}
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let response = HttpResponse::new(code, res_headers, body_text);
        tracing::debug!("Response status: {}", response.code);

        self.handlers.check(&response)?;

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Builds the `User-Agent` header: the client name, preceded by the
/// configured prefix when there is one.
pub(crate) fn user_agent(prefix: Option<&str>, client_name: &str) -> String {
    prefix.map_or_else(
        || client_name.to_string(),
        |prefix| format!("{prefix} | {client_name}"),
    )
}

/// Turns a classified not-found failure into `Ok(None)`.
///
/// Every other error is propagated unchanged.
pub(crate) fn found(result: Result<HttpResponse, HttpError>) -> Result<Option<Value>, HttpError> {
    match result {
        Ok(response) => Ok(Some(response.into_data())),
        Err(error) if error.is_not_found() => {
            tracing::debug!("Resource not found: {}", error);
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn masked_headers(headers: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut masked: Vec<(&str, &str)> = headers
        .iter()
        .map(|(key, value)| {
            let sensitive = SENSITIVE_HEADERS
                .iter()
                .any(|name| key.eq_ignore_ascii_case(name));
            (key.as_str(), if sensitive { "*****" } else { value.as_str() })
        })
        .collect();
    masked.sort_unstable();
    masked
}

fn multipart_form(
    file: FileUpload,
    data: Option<String>,
) -> Result<reqwest::multipart::Form, HttpError> {
    let mut part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
        .file_name(file.file_name().to_string());
    if let Some(mime) = file.mime_type() {
        part = part.mime_str(mime)?;
    }

    let mut form = reqwest::multipart::Form::new().part("file", part);
    if let Some(data) = data {
        form = form.text("data", data);
    }
    Ok(form)
}
