//! Resource-specific error types.
//!
//! Status codes from the backend are mapped to semantic variants:
//!
//! - **404**: [`ResourceError::NotFound`]
//! - **400 / 422**: [`ResourceError::ValidationFailed`]
//! - **Other 4xx/5xx**: [`ResourceError::Http`]
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_client::rest::{RestResource, ResourceError};
//! use bookstore_client::Author;
//!
//! match Author::get(&client, 123).await {
//!     Ok(author) => println!("Found: {:?}", author.name),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{resource} with id {id} not found");
//!     }
//!     Err(ResourceError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use crate::clients::{HttpError, HttpResponseError, RestError};
use crate::dates::DateError;
use thiserror::Error;

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The record was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Author").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The backend rejected the record (HTTP 400 or 422).
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// A map of field names to error messages. Record-level messages use the key `base`.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// No path is declared for the operation with the provided IDs.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "get", "update").
        operation: &'static str,
    },

    /// The operation needs a persisted record but the identity field is null.
    #[error("Cannot {operation} a {resource} without an id")]
    MissingId {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The record or its parameters could not be encoded as JSON.
    #[error("Failed to serialize {resource}: {message}")]
    Serialization {
        /// The type name of the resource.
        resource: &'static str,
        /// The serializer's message.
        message: String,
    },

    /// The response body did not match the record's shape.
    #[error("Failed to deserialize {resource}: {message}")]
    Deserialization {
        /// The type name of the resource.
        resource: &'static str,
        /// The deserializer's message.
        message: String,
    },

    /// A request or response transform hook rejected the payload.
    #[error("Failed to transform {resource} payload: {source}")]
    Transform {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying field conversion error.
        #[source]
        source: DateError,
    },

    /// An HTTP-level error that has no more specific meaning.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Creates a `ResourceError` from an error status and JSON body.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookstore_client::rest::ResourceError;
    /// use serde_json::json;
    ///
    /// let error = ResourceError::from_http_response(
    ///     404,
    ///     &json!({"message": "error.notfound"}),
    ///     "Author",
    ///     Some("123"),
    ///     Some("req-123"),
    /// );
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        code: u16,
        body: &serde_json::Value,
        resource: &'static str,
        id: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        match code {
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            400 | 422 => Self::ValidationFailed {
                errors: parse_validation_errors(body),
                request_id: request_id.map(ToString::to_string),
            },
            _ => Self::Http(HttpError::Response(HttpResponseError {
                code,
                message: body.to_string(),
                error_reference: request_id.map(ToString::to_string),
            })),
        }
    }

    /// Refines a [`RestError`] into a semantic resource error.
    ///
    /// Error responses are re-read from the serialized payload kept in
    /// [`HttpResponseError::message`]; other errors are wrapped unchanged.
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        match error {
            RestError::Http(HttpError::Response(response))
                if matches!(response.code, 400 | 404 | 422) =>
            {
                let body = serde_json::from_str(&response.message)
                    .unwrap_or(serde_json::Value::Null);
                Self::from_http_response(
                    response.code,
                    &body,
                    resource,
                    id,
                    response.error_reference.as_deref(),
                )
            }
            other => Self::Rest(other),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } => request_id.as_deref(),
            Self::Http(e) | Self::Rest(RestError::Http(e)) => e.error_reference(),
            _ => None,
        }
    }

    /// Returns the HTTP status this error was derived from, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Http(e) => e.status(),
            Self::Rest(e) => e.status(),
            _ => None,
        }
    }
}

/// Parses validation errors from an error body.
///
/// Accepted shapes:
///
/// ```json
/// {"fieldErrors": [{"objectName": "author", "field": "name", "message": "NotNull"}]}
/// {"errors": {"title": ["can't be blank"]}}
/// {"errors": ["Title can't be blank"]}
/// {"message": "error.idexists"}
/// ```
///
/// A bare `message` is only used when nothing more specific is present.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();

    if let Some(serde_json::Value::Array(field_errors)) = body.get("fieldErrors") {
        for entry in field_errors {
            let field = entry
                .get("field")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("base");
            if let Some(message) = entry.get("message").and_then(serde_json::Value::as_str) {
                result
                    .entry(field.to_string())
                    .or_default()
                    .push(message.to_string());
            }
        }
    }

    if let Some(errors) = body.get("errors") {
        match errors {
            serde_json::Value::Object(map) => {
                for (field, messages) in map {
                    let msgs: Vec<String> = match messages {
                        serde_json::Value::Array(arr) => arr
                            .iter()
                            .filter_map(|v| v.as_str().map(ToString::to_string))
                            .collect(),
                        serde_json::Value::String(s) => vec![s.clone()],
                        _ => vec![messages.to_string()],
                    };
                    result.entry(field.clone()).or_default().extend(msgs);
                }
            }
            serde_json::Value::Array(arr) => {
                let msgs: Vec<String> = arr
                    .iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect();
                if !msgs.is_empty() {
                    result.entry("base".to_string()).or_default().extend(msgs);
                }
            }
            serde_json::Value::String(s) => {
                result.entry("base".to_string()).or_default().push(s.clone());
            }
            _ => {}
        }
    }

    if result.is_empty() {
        if let Some(message) = body.get("message").and_then(serde_json::Value::as_str) {
            result.insert("base".to_string(), vec![message.to_string()]);
        }
    }

    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_error_formats_message_with_resource_and_id() {
        let error = ResourceError::NotFound {
            resource: "Book",
            id: "42".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("Book"));
        assert!(message.contains("42"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_missing_id_message() {
        let error = ResourceError::MissingId {
            resource: "Author",
            operation: "update",
        };
        assert_eq!(error.to_string(), "Cannot update a Author without an id");
    }

    #[test]
    fn test_from_http_response_maps_404_to_not_found() {
        let error = ResourceError::from_http_response(
            404,
            &json!({}),
            "Author",
            Some("123"),
            Some("req-123"),
        );

        assert!(matches!(
            error,
            ResourceError::NotFound { resource: "Author", id } if id == "123"
        ));
    }

    #[test]
    fn test_from_http_response_maps_400_field_errors() {
        let body = json!({
            "message": "error.validation",
            "fieldErrors": [
                {"objectName": "author", "field": "name", "message": "NotNull"},
                {"objectName": "author", "field": "name", "message": "Size"},
                {"objectName": "author", "field": "surname", "message": "NotNull"}
            ]
        });

        let error = ResourceError::from_http_response(400, &body, "Author", None, Some("req-456"));

        if let ResourceError::ValidationFailed { errors, request_id } = error {
            assert_eq!(errors.get("name").map(Vec::len), Some(2));
            assert_eq!(errors.get("surname"), Some(&vec!["NotNull".to_string()]));
            assert!(!errors.contains_key("base"));
            assert_eq!(request_id, Some("req-456".to_string()));
        } else {
            panic!("Expected ValidationFailed variant");
        }
    }

    #[test]
    fn test_from_http_response_maps_422_errors_object() {
        let body = json!({
            "errors": {
                "title": ["can't be blank"],
                "price": ["must be a number", "must be positive"]
            }
        });

        let error = ResourceError::from_http_response(422, &body, "Book", Some("1"), None);

        if let ResourceError::ValidationFailed { errors, .. } = error {
            assert_eq!(errors.get("title"), Some(&vec!["can't be blank".to_string()]));
            assert_eq!(errors.get("price").map(Vec::len), Some(2));
        } else {
            panic!("Expected ValidationFailed variant");
        }
    }

    #[test]
    fn test_bare_message_becomes_base_error() {
        let errors = parse_validation_errors(&json!({"message": "error.idexists"}));
        assert_eq!(errors.get("base"), Some(&vec!["error.idexists".to_string()]));

        let errors = parse_validation_errors(&json!({"errors": ["Error 1", "Error 2"]}));
        assert_eq!(errors.get("base").map(Vec::len), Some(2));
    }

    #[test]
    fn test_from_http_response_maps_other_codes_to_http() {
        let error = ResourceError::from_http_response(
            500,
            &json!({"message": "Internal error"}),
            "Book",
            None,
            Some("req-789"),
        );

        assert!(matches!(error, ResourceError::Http(_)));
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.request_id(), Some("req-789"));
    }

    #[test]
    fn test_from_rest_error_reads_serialized_payload() {
        let rest_error = RestError::Http(HttpError::Response(HttpResponseError {
            code: 400,
            message: r#"{"fieldErrors":[{"field":"title","message":"NotNull"}]}"#.to_string(),
            error_reference: Some("req-1".to_string()),
        }));

        let error = ResourceError::from_rest_error(rest_error, "Book", None);
        assert!(matches!(
            &error,
            ResourceError::ValidationFailed { errors, .. } if errors.contains_key("title")
        ));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_from_rest_error_maps_404_and_passes_others_through() {
        let not_found = RestError::Http(HttpError::Response(HttpResponseError {
            code: 404,
            message: "{}".to_string(),
            error_reference: None,
        }));
        assert!(matches!(
            ResourceError::from_rest_error(not_found, "Author", Some("9")),
            ResourceError::NotFound { id, .. } if id == "9"
        ));

        let server = RestError::Http(HttpError::Response(HttpResponseError {
            code: 503,
            message: "{}".to_string(),
            error_reference: None,
        }));
        let error = ResourceError::from_rest_error(server, "Author", None);
        assert!(matches!(error, ResourceError::Rest(_)));
        assert_eq!(error.status(), Some(503));
    }

    #[test]
    fn test_transform_error_exposes_source() {
        let error = ResourceError::Transform {
            resource: "Book",
            source: DateError::InvalidDate {
                value: "soon".to_string(),
            },
        };
        assert!(error.to_string().contains("soon"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
