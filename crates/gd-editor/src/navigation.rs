//! Navigation requests leaving the editor.

/// Shown when leaving the editor (or the page) with unsaved changes.
pub const UNSAVED_CHANGES_WARNING: &str =
    "You have unsaved changes. If you leave, your changes will be lost.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    ProjectsList,
    Documentation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Nothing to lose; the host may navigate now.
    Proceed(Destination),
    /// The host must confirm with the user, then call
    /// `EditorSession::confirm_navigation` or `cancel_navigation`.
    ConfirmDiscard {
        destination: Destination,
        message: &'static str,
    },
}
