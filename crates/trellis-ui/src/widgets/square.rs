//! Square widget implementation

#![allow(non_snake_case)]

use trellis_ui_graphics::Color;

use super::nodes::SquareElement;
use crate::element::AnyElement;

/// A filled square with sides of `side` pixels.
pub fn Square(side: f32, color: Color) -> AnyElement {
    Box::new(SquareElement { side, color })
}
