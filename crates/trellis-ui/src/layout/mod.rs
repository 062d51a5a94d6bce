//! Layout of container elements: linear boxes, grids and scroll viewports.

pub mod grid;
pub mod linear;
pub mod scroll;

pub use grid::{GridLayout, GridSpec};
pub use linear::{BoxSpec, LinearLayout};
pub use scroll::{ScrollContainer, ScrollSpec, SCROLL_OFFSET_SLOT};
