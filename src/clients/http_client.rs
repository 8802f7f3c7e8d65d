//! HTTP client for the bookstore backend.
//!
//! This module provides the [`HttpClient`] type. It performs exactly one
//! attempt per request; failures are returned to the caller unchanged.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError, MalformedBodyError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::BookstoreConfig;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error payload keys copied into [`HttpResponseError::message`].
const ERROR_KEYS: &[&str] = &[
    "message",
    "description",
    "fieldErrors",
    "errors",
    "error",
    "error_description",
];

/// HTTP client for making requests to the bookstore REST API.
///
/// The client handles:
/// - URL construction from the configured base URL and API path
/// - Default headers (User-Agent, Accept)
/// - Response header parsing, including pagination links
/// - Mapping non-2xx responses to [`HttpResponseError`]
/// - Rejecting 2xx responses whose body is not JSON; an empty body is
///   returned as `null`
///
/// `HttpClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use bookstore_client::{BookstoreConfig, BaseUrl};
/// use bookstore_client::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = BookstoreConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:8080")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "authors").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `http://localhost:8080`).
    base_uri: String,
    /// Base path (e.g., "/api").
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS backend initialization failure).
    pub fn new(config: &BookstoreConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Bookstore Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_uri: config.base_url().as_ref().to_string(),
            base_path: config.api_path().to_string(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL a request path resolves to.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends an HTTP request to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error or timeout occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    /// - A 2xx response carries a non-JSON body (`MalformedBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, %url, "sending request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let success = (200..=299).contains(&code);

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(e) if success => {
                    let error_reference = res_headers
                        .get("x-request-id")
                        .and_then(|values| values.first())
                        .cloned();
                    tracing::warn!(
                        method = %request.http_method,
                        path = %request.path,
                        status = code,
                        "response body is not JSON"
                    );
                    return Err(HttpError::MalformedBody(MalformedBodyError {
                        code,
                        message: e.to_string(),
                        error_reference,
                    }));
                }
                Err(_) if code >= 500 => serde_json::json!({ "raw_body": body_text }),
                Err(_) => serde_json::Value::Null,
            }
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            method = %request.http_method,
            path = %request.path,
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "request failed"
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
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

    /// Serializes the error-bearing parts of a response body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ERROR_KEYS {
            if let Some(value) = response.body.get(*key) {
                error_body.insert((*key).to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}
