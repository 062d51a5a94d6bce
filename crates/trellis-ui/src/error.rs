use thiserror::Error;
use trellis_ui_layout::LayoutError;

/// Raised by the text editing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A keymap produced an action name the action table has no entry for.
    #[error("no action named `{0}` is registered")]
    UnknownAction(String),
}

/// Errors surfaced by layout passes and event handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Edit(#[from] EditError),
}
