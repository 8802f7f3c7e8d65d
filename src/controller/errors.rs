//! Controller error types.

use thiserror::Error;

use crate::rest::ResourceError;

/// Errors returned by list and detail controller operations.
///
/// A failed operation leaves the controller's state as it was.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The underlying resource call failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// `save()` was called with no selected record.
    #[error("No {resource} is selected")]
    NothingSelected {
        /// The type name of the resource.
        resource: &'static str,
    },

    /// A required route parameter is absent.
    #[error("Missing route parameter '{name}'")]
    MissingRouteParam {
        /// The parameter name.
        name: &'static str,
    },

    /// A route parameter could not be parsed as an identifier.
    #[error("Invalid route parameter '{name}': '{value}'")]
    InvalidRouteParam {
        /// The parameter name.
        name: &'static str,
        /// The raw value.
        value: String,
    },
}

impl ControllerError {
    /// Returns the resource error, if this error came from the backend call.
    #[must_use]
    pub const fn as_resource_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Resource(e) => Some(e),
            _ => None,
        }
    }
}

// Verify ControllerError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ControllerError>();
};
