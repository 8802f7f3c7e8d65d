//! Response wrapper for REST resource operations.
//!
//! [`ResourceResponse<T>`] carries the decoded record(s) together with the
//! pagination links and request ID of the HTTP response. It implements
//! `Deref<Target = T>`, so a list response can be used like the `Vec`:
//!
//! ```rust,ignore
//! let response: ResourceResponse<Vec<Book>> = Book::query(&client, Some(params)).await?;
//!
//! for book in response.iter() {
//!     println!("{:?}", book.title);
//! }
//!
//! if let Some(next) = response.links().page_number("next") {
//!     println!("next page: {next}");
//! }
//!
//! let books: Vec<Book> = response.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::clients::{HttpResponse, PageLinks};
use crate::rest::ResourceError;

/// A decoded response from a REST resource operation.
///
/// # Example
///
/// ```rust
/// use bookstore_client::rest::ResourceResponse;
/// use bookstore_client::clients::PageLinks;
///
/// let links = PageLinks::parse(r#"</api/books?page=2>; rel="next""#);
/// let response = ResourceResponse::new(vec!["a", "b"], links, Some("req-1".to_string()));
///
/// assert_eq!(response.len(), 2);
/// assert!(response.has_next_page());
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    links: PageLinks,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(data: T, links: PageLinks, request_id: Option<String>) -> Self {
        Self {
            data,
            links,
            request_id,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the pagination links of the response.
    ///
    /// Empty when the backend sent no `Link` header.
    #[must_use]
    pub const fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Returns `true` if a `next` relation was present.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.links.has_next()
    }

    /// Returns `true` if a `prev` relation was present.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.links.has_prev()
    }

    /// Returns the request ID from the response headers.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Splits the response into its data and pagination links.
    #[must_use]
    pub fn into_parts(self) -> (T, PageLinks) {
        (self.data, self.links)
    }

    /// Maps the inner data while keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            links: self.links,
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes the whole response body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialization`] if the body does not match `T`.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let request_id = response.request_id().map(ToString::to_string);
        let links = response.links().clone();

        let data: T =
            serde_json::from_value(response.body).map_err(|e| ResourceError::Deserialization {
                resource,
                message: e.to_string(),
            })?;

        Ok(Self {
            data,
            links,
            request_id,
        })
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
