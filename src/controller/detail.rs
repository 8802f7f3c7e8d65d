//! Read-only detail controller.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clients::RestClient;
use crate::controller::token::TokenCounter;
use crate::controller::{ControllerError, LoadOutcome};
use crate::rest::RestResource;

/// Route parameter name holding the record identifier.
pub const ID_PARAM: &str = "id";

/// Access to the parameters of the current route.
pub trait RouteParams {
    /// Returns the raw value of parameter `name`.
    fn param(&self, name: &str) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> RouteParams for HashMap<String, String, S> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: std::hash::BuildHasher> RouteParams for HashMap<&str, &str, S> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

#[derive(Debug)]
struct DetailState<R> {
    record: R,
    loads: TokenCounter,
}

/// Holds one record for a detail view.
///
/// Starts with a blank record; [`DetailController::load`] replaces it.
#[derive(Debug)]
pub struct DetailController<R> {
    client: Arc<RestClient>,
    state: Mutex<DetailState<R>>,
}

impl<R: RestResource> DetailController<R> {
    /// Creates a controller holding a blank record.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            state: Mutex::new(DetailState {
                record: R::default(),
                loads: TokenCounter::default(),
            }),
        }
    }

    /// Returns the held record.
    pub async fn record(&self) -> R {
        self.state.lock().await.record.clone()
    }

    /// Fetches the record with `id` and holds it.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the fetch fails; the held
    /// record is unchanged.
    pub async fn load(&self, id: R::Id) -> Result<LoadOutcome, ControllerError> {
        let token = self.state.lock().await.loads.issue();

        tracing::debug!(resource = R::NAME, id = %id, "loading record");

        let record = match R::get(&self.client, id).await {
            Ok(response) => response.into_inner(),
            Err(error) => {
                tracing::warn!(
                    resource = R::NAME,
                    operation = "load",
                    error = %error,
                    "controller operation failed"
                );
                return Err(error.into());
            }
        };

        let mut state = self.state.lock().await;
        if !state.loads.is_latest(token) {
            tracing::debug!(resource = R::NAME, "discarding superseded record");
            return Ok(LoadOutcome::Superseded);
        }
        state.record = record;
        drop(state);

        Ok(LoadOutcome::Applied)
    }

    /// Loads the record named by the route's `id` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::MissingRouteParam`] or
    /// [`ControllerError::InvalidRouteParam`] for a bad route, otherwise as
    /// [`DetailController::load`].
    pub async fn load_from_route<P>(&self, route: &P) -> Result<LoadOutcome, ControllerError>
    where
        P: RouteParams + ?Sized,
    {
        let raw = route
            .param(ID_PARAM)
            .ok_or(ControllerError::MissingRouteParam { name: ID_PARAM })?;

        let id = raw
            .trim()
            .parse::<R::Id>()
            .map_err(|_| ControllerError::InvalidRouteParam {
                name: ID_PARAM,
                value: raw.to_string(),
            })?;

        self.load(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseUrl, BookstoreConfig};
    use crate::rest::resources::Book;

    fn controller() -> DetailController<Book> {
        let config = BookstoreConfig::builder()
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        DetailController::new(Arc::new(RestClient::new(&config).unwrap()))
    }

    #[tokio::test]
    async fn test_starts_with_blank_record() {
        assert_eq!(controller().record().await, Book::default());
    }

    #[tokio::test]
    async fn test_load_from_route_requires_id() {
        let route: HashMap<String, String> = HashMap::new();
        let result = controller().load_from_route(&route).await;

        assert!(matches!(
            result,
            Err(ControllerError::MissingRouteParam { name: "id" })
        ));
    }

    #[tokio::test]
    async fn test_load_from_route_rejects_non_numeric_id() {
        let mut route = HashMap::new();
        route.insert("id", "twelve");
        let result = controller().load_from_route(&route).await;

        assert!(matches!(
            result,
            Err(ControllerError::InvalidRouteParam { value, .. }) if value == "twelve"
        ));
    }

    #[test]
    fn test_route_params_lookup() {
        let mut route = HashMap::new();
        route.insert("id".to_string(), "4".to_string());
        assert_eq!(route.param("id"), Some("4"));
        assert_eq!(route.param("slug"), None);
    }
}
