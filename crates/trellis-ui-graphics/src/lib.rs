//! Pure math/data for drawing & units in Trellis
//!
//! This crate contains geometry primitives, color definitions and font
//! configuration that are used throughout the Trellis toolkit.

mod color;
mod geometry;
mod typography;

pub use color::*;
pub use geometry::*;
pub use typography::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::typography::{FontConfig, FontWeight};
}
