//! Paginated list controller with edit and two-phase delete.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clients::{PageLinks, RestClient};
use crate::controller::token::TokenCounter;
use crate::controller::{ControllerError, LoadOutcome, Surface, ViewPresenter};
use crate::rest::{PageParams, ResourceError, RestResource};

/// State of the two-phase delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteWorkflow<R> {
    /// No delete in progress.
    #[default]
    Idle,
    /// The record has been fetched and awaits confirmation.
    PendingConfirmation(R),
}

impl<R> DeleteWorkflow<R> {
    /// Returns `true` if no delete is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the record awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<&R> {
        match self {
            Self::PendingConfirmation(record) => Some(record),
            Self::Idle => None,
        }
    }
}

#[derive(Debug)]
struct ListState<R> {
    page: u32,
    records: Vec<R>,
    links: PageLinks,
    selected: Option<R>,
    delete: DeleteWorkflow<R>,
    loads: TokenCounter,
    selections: TokenCounter,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            page: 1,
            records: Vec::new(),
            links: PageLinks::new(),
            selected: None,
            delete: DeleteWorkflow::Idle,
            loads: TokenCounter::default(),
            selections: TokenCounter::default(),
        }
    }
}

/// Drives a paginated listing of one resource type.
///
/// Starts on page 1 with no records and nothing selected. Operations take
/// `&self`; several may be in flight at once, and only the most recently
/// issued list load (or selection fetch) is applied.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use bookstore_client::controller::{ListController, NoopView};
/// use bookstore_client::Book;
///
/// let books: ListController<Book, _> = ListController::new(Arc::new(client), NoopView);
/// books.load_all().await?;
/// books.load_page(3).await?;
///
/// books.show_update(12).await?;
/// books.save().await?;
/// ```
#[derive(Debug)]
pub struct ListController<R, V> {
    client: Arc<RestClient>,
    view: V,
    page_size: u32,
    state: Mutex<ListState<R>>,
}

impl<R, V> ListController<R, V>
where
    R: RestResource<QueryParams = PageParams>,
    V: ViewPresenter,
{
    /// Creates a controller on page 1. The page size comes from the client's
    /// configuration.
    #[must_use]
    pub fn new(client: Arc<RestClient>, view: V) -> Self {
        let page_size = client.page_size();
        Self {
            client,
            view,
            page_size,
            state: Mutex::new(ListState::default()),
        }
    }

    /// Returns the view presenter.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Returns the number of records requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the 1-based number of the page whose records are held.
    pub async fn page(&self) -> u32 {
        self.state.lock().await.page
    }

    /// Returns the records of the most recently applied load.
    pub async fn records(&self) -> Vec<R> {
        self.state.lock().await.records.clone()
    }

    /// Returns the pagination links of the most recently applied load.
    pub async fn links(&self) -> PageLinks {
        self.state.lock().await.links.clone()
    }

    /// Returns the selected record, if any.
    pub async fn selected(&self) -> Option<R> {
        self.state.lock().await.selected.clone()
    }

    /// Returns the delete workflow state.
    pub async fn delete_workflow(&self) -> DeleteWorkflow<R> {
        self.state.lock().await.delete.clone()
    }

    /// Reloads the current page.
    ///
    /// Replaces the records and links unless a newer load was issued while
    /// this one was in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the query fails. The records
    /// and links are left unchanged.
    pub async fn load_all(&self) -> Result<LoadOutcome, ControllerError> {
        let page = self.state.lock().await.page;
        self.load(page, "load_all").await
    }

    /// Loads `page` and makes it the current page once its records arrive.
    ///
    /// # Errors
    ///
    /// See [`ListController::load_all`]. On failure the current page is
    /// unchanged.
    pub async fn load_page(&self, page: u32) -> Result<LoadOutcome, ControllerError> {
        self.load(page, "load_page").await
    }

    async fn load(
        &self,
        page: u32,
        operation: &'static str,
    ) -> Result<LoadOutcome, ControllerError> {
        let token = self.state.lock().await.loads.issue();

        tracing::debug!(resource = R::NAME, page, per_page = self.page_size, "loading page");

        let response = R::query(&self.client, Some(PageParams::new(page, self.page_size)))
            .await
            .map_err(|e| Self::failed(operation, e))?;

        let mut state = self.state.lock().await;
        if !state.loads.is_latest(token) {
            tracing::debug!(resource = R::NAME, page, "discarding superseded page response");
            return Ok(LoadOutcome::Superseded);
        }

        let (records, links) = response.into_parts();
        state.page = page;
        state.records = records;
        state.links = links;
        drop(state);

        Ok(LoadOutcome::Applied)
    }

    /// Fetches a record, selects it and reveals the edit surface.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the fetch fails.
    pub async fn show_update(&self, id: R::Id) -> Result<LoadOutcome, ControllerError> {
        let token = self.state.lock().await.selections.issue();

        let record = R::get(&self.client, id)
            .await
            .map_err(|e| Self::failed("show_update", e))?
            .into_inner();

        let mut state = self.state.lock().await;
        if !state.selections.is_latest(token) {
            tracing::debug!(resource = R::NAME, "discarding superseded selection");
            return Ok(LoadOutcome::Superseded);
        }
        state.selected = Some(record);
        drop(state);

        self.view.show(Surface::Edit, R::NAME);
        Ok(LoadOutcome::Applied)
    }

    /// Stores the selected record, then refreshes.
    ///
    /// A record with an identity is replaced with PUT; one without is created
    /// with POST. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NothingSelected`] if no record is selected,
    /// or [`ControllerError::Resource`] if storing or reloading fails. When
    /// storing fails the selection is kept so the form can be corrected.
    pub async fn save(&self) -> Result<R, ControllerError> {
        let record = self
            .state
            .lock()
            .await
            .selected
            .clone()
            .ok_or(ControllerError::NothingSelected { resource: R::NAME })?;

        tracing::debug!(
            resource = R::NAME,
            id = ?record.get_id(),
            "saving selected record"
        );

        let stored = record
            .persist(&self.client)
            .await
            .map_err(|e| Self::failed("save", e))?;

        self.refresh().await?;
        Ok(stored)
    }

    /// Dismisses the edit surface, clears the selection and reloads the
    /// current page.
    ///
    /// # Errors
    ///
    /// See [`ListController::load_all`].
    pub async fn refresh(&self) -> Result<LoadOutcome, ControllerError> {
        self.view.hide(Surface::Edit, R::NAME);
        self.clear().await;
        self.load_all().await
    }

    /// Fetches a record and asks for delete confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the fetch fails; the workflow
    /// stays as it was.
    pub async fn delete(&self, id: R::Id) -> Result<LoadOutcome, ControllerError> {
        let token = self.state.lock().await.selections.issue();

        let record = R::get(&self.client, id)
            .await
            .map_err(|e| Self::failed("delete", e))?
            .into_inner();

        let mut state = self.state.lock().await;
        if !state.selections.is_latest(token) {
            tracing::debug!(resource = R::NAME, "discarding superseded delete target");
            return Ok(LoadOutcome::Superseded);
        }
        state.selected = Some(record.clone());
        state.delete = DeleteWorkflow::PendingConfirmation(record);
        drop(state);

        self.view.show(Surface::DeleteConfirmation, R::NAME);
        Ok(LoadOutcome::Applied)
    }

    /// Deletes the record, then dismisses the confirmation, clears the
    /// selection and reloads the current page.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Resource`] if the delete or the reload
    /// fails. A failed delete leaves the workflow pending.
    pub async fn confirm_delete(&self, id: R::Id) -> Result<LoadOutcome, ControllerError> {
        {
            let state = self.state.lock().await;
            let pending_id = state.delete.pending().and_then(|record| record.get_id());
            if pending_id.as_ref() != Some(&id) {
                tracing::debug!(
                    resource = R::NAME,
                    id = %id,
                    pending = ?pending_id,
                    "confirming delete of a record that is not pending"
                );
            }
        }

        R::delete(&self.client, id)
            .await
            .map_err(|e| Self::failed("confirm_delete", e))?;

        self.view.hide(Surface::DeleteConfirmation, R::NAME);
        self.state.lock().await.delete = DeleteWorkflow::Idle;
        self.clear().await;
        self.load_all().await
    }

    /// Abandons a pending delete and clears the selection.
    pub async fn cancel_delete(&self) {
        self.state.lock().await.delete = DeleteWorkflow::Idle;
        self.view.hide(Surface::DeleteConfirmation, R::NAME);
        self.clear().await;
    }

    /// Replaces the selected record with the edit form's current values.
    pub async fn set_selected(&self, record: R) {
        self.state.lock().await.selected = Some(record);
    }

    /// Replaces the selection with a blank record and resets the edit form.
    ///
    /// Selection fetches still in flight are discarded when they land.
    pub async fn clear(&self) {
        {
            let mut state = self.state.lock().await;
            state.selections.issue();
            state.selected = Some(R::default());
        }
        self.view.reset_form(R::NAME);
    }

    fn failed(operation: &'static str, error: ResourceError) -> ControllerError {
        tracing::warn!(
            resource = R::NAME,
            operation,
            status = ?error.status(),
            request_id = ?error.request_id(),
            error = %error,
            "controller operation failed"
        );
        ControllerError::Resource(error)
    }
}
