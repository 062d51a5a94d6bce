//! Foundation pieces for Trellis: input events and focus tracking.

pub mod nodes;

// Re-export commonly used items
pub use nodes::input::*;

pub mod prelude {
    pub use crate::nodes::input::{
        FocusManager, KeyEvent, Modifiers, PointerButton, PointerButtons, PointerEvent,
        PointerEventKind, UiEvent, WheelEvent,
    };
}
