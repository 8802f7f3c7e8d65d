//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: non-2xx HTTP responses from the backend
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`MalformedBodyError`]: a 2xx response whose body is not JSON
//! - [`HttpError`]: unified error type for the transport layer
//!
//! The transport never retries. A failed call is reported once to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_client::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("Server said {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::MalformedBody(e)) => println!("Unreadable body: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is the serialized error payload (`message`, `description`,
/// `fieldErrors`, `errors`, `error` keys from the body, plus an
/// `error_reference` when the server sent an `X-Request-Id`).
///
/// # Example
///
/// ```rust
/// use bookstore_client::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"message":"error.notfound"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"message":"error.notfound"}"#);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use bookstore_client::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Error returned when a successful response carries a body that is not JSON.
///
/// Typically an HTML page served by a proxy in front of the backend.
#[derive(Debug, Error)]
#[error("Response with status {code} has a malformed body: {message}")]
pub struct MalformedBodyError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The parser error.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A 2xx response whose body could not be parsed.
    #[error(transparent)]
    MalformedBody(#[from] MalformedBodyError),

    /// Network, connection, or timeout error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MalformedBody(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the request ID the server sent with the failed response.
    #[must_use]
    pub fn error_reference(&self) -> Option<&str> {
        match self {
            Self::Response(e) => e.error_reference.as_deref(),
            Self::MalformedBody(e) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}
