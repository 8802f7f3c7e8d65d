//! Configuration types for the bookstore client.
//!
//! - [`BookstoreConfig`]: where the backend lives and how lists are paged
//! - [`BookstoreConfigBuilder`]: builder for [`BookstoreConfig`]
//! - [`BaseUrl`]: a validated absolute backend URL
//!
//! # Example
//!
//! ```rust
//! use bookstore_client::{BookstoreConfig, BaseUrl};
//!
//! let config = BookstoreConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_path(), "/api");
//! assert_eq!(config.page_size(), 20);
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::time::Duration;

use crate::error::ConfigError;

/// Default REST API mount point on the backend.
pub const DEFAULT_API_PATH: &str = "/api";

/// Default number of records requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuration for the bookstore client.
///
/// `BookstoreConfig` is `Clone`, `Send`, and `Sync`; it is passed explicitly to
/// the clients and controllers that need it. There is no global instance.
#[derive(Clone, Debug)]
pub struct BookstoreConfig {
    base_url: BaseUrl,
    api_path: String,
    page_size: u32,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BookstoreConfig {
    /// Creates a new builder for constructing a `BookstoreConfig`.
    #[must_use]
    pub fn builder() -> BookstoreConfigBuilder {
        BookstoreConfigBuilder::new()
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the REST API mount point (e.g., "/api").
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns the number of records requested per list page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify BookstoreConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BookstoreConfig>();
};

/// Builder for constructing [`BookstoreConfig`] instances.
///
/// Only `base_url` is required.
///
/// # Defaults
///
/// - `api_path`: `/api`
/// - `page_size`: `20`
/// - `timeout`: `None` (transport default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BookstoreConfigBuilder {
    base_url: Option<BaseUrl>,
    api_path: Option<String>,
    page_size: Option<u32>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BookstoreConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the REST API mount point.
    ///
    /// The value is normalized to a single leading slash and no trailing
    /// slash; an empty value mounts the API at the server root.
    #[must_use]
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Sets the number of records requested per list page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BookstoreConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set
    /// and [`ConfigError::InvalidPageSize`] for a page size of zero.
    pub fn build(self) -> Result<BookstoreConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: page_size });
        }

        let api_path = self
            .api_path
            .map_or_else(|| DEFAULT_API_PATH.to_string(), |p| normalize_api_path(&p));

        Ok(BookstoreConfig {
            base_url,
            api_path,
            page_size,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn normalize_api_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
