//! HTTP response types.

use std::collections::HashMap;

use crate::clients::links::PageLinks;

/// An HTTP response from the bookstore backend.
///
/// Header names are stored lowercased. The `Link` header is parsed once on
/// construction; relations split across several `Link` headers are merged.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    links: PageLinks,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `link` header if present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookstore_client::clients::HttpResponse;
    /// use std::collections::HashMap;
    /// use serde_json::json;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert(
    ///     "link".to_string(),
    ///     vec![r#"</api/authors?page=2>; rel="next""#.to_string()],
    /// );
    ///
    /// let response = HttpResponse::new(200, headers, json!([]));
    /// assert_eq!(response.links().next(), Some("/api/authors?page=2"));
    /// ```
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let link_header = headers.get("link").map(|values| values.join(","));
        let links = PageLinks::from_header(link_header.as_deref());

        Self {
            code,
            headers,
            body,
            links,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the pagination links parsed from the `Link` header.
    #[must_use]
    pub const fn links(&self) -> &PageLinks {
        &self.links
    }
}
