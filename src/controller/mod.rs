//! List and detail controllers over [`RestResource`](crate::rest::RestResource)s.
//!
//! Controllers own their view state explicitly and surface every failure as
//! a [`ControllerError`]. A failed operation leaves the state untouched.
//!
//! - [`ListController`]: paging, selection for edit, save, and the two-phase
//!   delete tracked by [`DeleteWorkflow`]
//! - [`DetailController`]: one record, loaded by ID or from route parameters
//! - [`Lookup`]: records of a related resource offered as choices on an edit
//!   form
//! - [`ViewPresenter`]: the presentation collaborator (modal surfaces and
//!   form reset); [`NoopView`] ignores every signal
//!
//! Each list load, lookup load and selection fetch takes a request token. A
//! response that arrives after a newer request was issued is discarded and
//! reported as [`LoadOutcome::Superseded`].

mod detail;
mod errors;
mod list;
mod lookup;
mod token;
mod view;

pub use detail::{DetailController, RouteParams, ID_PARAM};
pub use errors::ControllerError;
pub use list::{DeleteWorkflow, ListController};
pub use lookup::Lookup;
pub use view::{NoopView, Surface, ViewPresenter};

/// What happened to a fetched response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied to the controller state.
    Applied,
    /// A newer request was issued first; the response was dropped.
    Superseded,
}

impl LoadOutcome {
    /// Returns `true` if the response was applied.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
