//! UI Widget components

pub mod boxes;
pub mod grid;
pub mod icon;
pub mod nodes;
pub mod scroll;
pub mod spacer;
pub mod square;
pub mod text;
pub mod text_input;
pub mod window;

pub use boxes::*;
pub use grid::*;
pub use icon::*;
pub use nodes::*;
pub use scroll::*;
pub use spacer::*;
pub use square::*;
pub use text::*;
pub use text_input::*;
pub use window::*;
