//! The presentation collaborator driven by the controllers.

use std::fmt;

/// A modal surface a list controller can reveal or dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The create/edit form.
    Edit,
    /// The delete confirmation prompt.
    DeleteConfirmation,
}

impl Surface {
    /// Returns the conventional surface name for a resource.
    ///
    /// ```rust
    /// use bookstore_client::controller::Surface;
    ///
    /// assert_eq!(Surface::Edit.name_for("Book"), "saveBookModal");
    /// assert_eq!(Surface::DeleteConfirmation.name_for("Author"), "deleteAuthorConfirmation");
    /// ```
    #[must_use]
    pub fn name_for(self, resource: &str) -> String {
        match self {
            Self::Edit => format!("save{resource}Modal"),
            Self::DeleteConfirmation => format!("delete{resource}Confirmation"),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit"),
            Self::DeleteConfirmation => f.write_str("delete-confirmation"),
        }
    }
}

/// Receives presentation signals from a controller.
///
/// `resource` is the resource's `NAME` (e.g. `"Book"`).
pub trait ViewPresenter: Send + Sync {
    /// Reveals `surface`.
    fn show(&self, surface: Surface, resource: &'static str);

    /// Dismisses `surface`.
    fn hide(&self, surface: Surface, resource: &'static str);

    /// Marks the edit form pristine and untouched.
    fn reset_form(&self, resource: &'static str);
}

/// A presenter that ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopView;

impl ViewPresenter for NoopView {
    fn show(&self, _surface: Surface, _resource: &'static str) {}

    fn hide(&self, _surface: Surface, _resource: &'static str) {}

    fn reset_form(&self, _resource: &'static str) {}
}

impl<V: ViewPresenter + ?Sized> ViewPresenter for std::sync::Arc<V> {
    fn show(&self, surface: Surface, resource: &'static str) {
        (**self).show(surface, resource);
    }

    fn hide(&self, surface: Surface, resource: &'static str) {
        (**self).hide(surface, resource);
    }

    fn reset_form(&self, resource: &'static str) {
        (**self).reset_form(resource);
    }
}
