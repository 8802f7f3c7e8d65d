//! Path-level REST client for the bookstore API.
//!
//! [`RestClient`] sits on top of [`HttpClient`](crate::clients::HttpClient)
//! and offers `get()`, `post()`, `put()` and `delete()` with relative paths
//! such as `"authors"` or `"books/12"`. Typed access to records goes through
//! [`RestResource`](crate::rest::RestResource), which calls this client.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_client::{BookstoreConfig, BaseUrl, RestClient};
//!
//! let config = BookstoreConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let response = client.get("authors", None).await?;
//! println!("Authors: {}", response.body);
//! ```
//!
//! # Path Normalization
//!
//! Leading slashes are stripped (`/authors` -> `authors`) and an empty path
//! is rejected with [`RestError::InvalidPath`].

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
