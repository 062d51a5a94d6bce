//! Text layout and the text editing engine.

pub mod actions;
pub mod keymap;
pub mod layout;
pub mod model;
pub mod selection;

pub use actions::{ActionFn, ActionInput, ActionTable, EditOutcome};
pub use keymap::Keymap;
pub use layout::{break_lines, wrap_lines, TextElement, TextMode, TextSpec};
pub use model::{TextModel, TextPoint};
pub use selection::TextSelection;
