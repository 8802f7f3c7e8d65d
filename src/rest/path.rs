//! Path declarations for REST resources.
//!
//! Every resource declares one [`ResourcePath`] per operation it supports.
//! Templates use `{name}` placeholders that are filled from the IDs the
//! caller has at hand:
//!
//! ```rust
//! use bookstore_client::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use bookstore_client::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Query, &[], "authors"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "authors/{id}"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Get, &["id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", 7);
//! assert_eq!(build_path(path.template, &ids), "authors/7");
//! ```
//!
//! When several paths match, the one with the most placeholders wins.

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations a resource client can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List records (GET /authors).
    Query,
    /// Fetch one record (GET /authors/{id}).
    Get,
    /// Create a record (POST /authors).
    Save,
    /// Replace a record (PUT /authors/{id}).
    Update,
    /// Remove a record (DELETE /authors/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Get => "get",
            Self::Save => "save",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to reach a resource for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Placeholder names the template needs.
    pub ids: &'static [&'static str],
    /// The path template, relative to the API base path.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`. Usable in `const` tables.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of placeholders this path needs.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks that every placeholder of this path is available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for `operation` given the available IDs.
///
/// Returns `None` if the resource declares no path for the operation or
/// every candidate needs an ID the caller does not have.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Fills `{name}` placeholders in `template` from `ids`.
///
/// Values are percent-encoded so an identifier can never add a path segment.
/// Placeholders with no value are left as they are.
///
/// ```rust
/// use bookstore_client::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "12");
/// assert_eq!(build_path("books/{id}", &ids), "books/12");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
