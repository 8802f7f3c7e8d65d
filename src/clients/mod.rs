//! HTTP transport for the bookstore REST API.
//!
//! - [`HttpClient`]: the async HTTP client
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response, including its [`PageLinks`]
//! - [`HttpMethod`]: GET, POST, PUT, DELETE
//! - [`PageLinks`]: pagination relations parsed from the `Link` header
//! - [`rest::RestClient`]: path-level REST client
//! - [`rest::RestError`]: REST-specific error types
//!
//! Requests are attempted once. Non-2xx responses become
//! [`HttpError::Response`]; there is no automatic retry.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod links;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, MalformedBodyError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use links::{PageLinks, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};

pub use rest::{RestClient, RestError};
