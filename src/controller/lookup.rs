//! Choice lists of related records.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clients::RestClient;
use crate::controller::token::TokenCounter;
use crate::controller::{ControllerError, LoadOutcome};
use crate::rest::RestResource;

#[derive(Debug)]
struct LookupState<R> {
    records: Vec<R>,
    loads: TokenCounter,
}

/// The records of a related resource offered as choices on an edit form,
/// such as the authors a book can be attributed to.
///
/// Loads the collection with an unparameterized query, so the backend's
/// default page applies.
///
/// ```rust,ignore
/// let authors: Lookup<Author> = Lookup::new(Arc::clone(&client));
/// authors.load().await?;
/// let author = authors.find(&3).await;
/// ```
#[derive(Debug)]
pub struct Lookup<R> {
    client: Arc<RestClient>,
    state: Mutex<LookupState<R>>,
}

impl<R: RestResource> Lookup<R> {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            state: Mutex::new(LookupState {
                records: Vec::new(),
                loads: TokenCounter::default(),
            }),
        }
    }

    /// Returns the loaded records.
    pub async fn records(&self) -> Vec<R> {
        self.state.lock().await.records.clone()
    }

    /// Returns the loaded record with `id`.
    pub async fn find(&self, id: &R::Id) -> Option<R> {
        self.state
            .lock()
            .await
            .records
            .iter()
            .find(|record| record.get_id().as_ref() == Some(id))
            .cloned()
    }

    /// Fetches the choices.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the query fails; the loaded
    /// records are unchanged.
    pub async fn load(&self) -> Result<LoadOutcome, ControllerError> {
        let token = self.state.lock().await.loads.issue();

        tracing::debug!(resource = R::NAME, "loading lookup");

        let records = match R::query(&self.client, None).await {
            Ok(response) => response.into_inner(),
            Err(error) => {
                tracing::warn!(
                    resource = R::NAME,
                    operation = "lookup",
                    error = %error,
                    "controller operation failed"
                );
                return Err(error.into());
            }
        };

        let mut state = self.state.lock().await;
        if !state.loads.is_latest(token) {
            return Ok(LoadOutcome::Superseded);
        }
        state.records = records;
        drop(state);

        Ok(LoadOutcome::Applied)
    }
}
