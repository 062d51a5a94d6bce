//! Horizontal and vertical box widgets

#![allow(non_snake_case)]

use trellis_ui_layout::Axis;

use crate::element::AnyElement;
use crate::layout::{BoxSpec, LinearLayout};

/// Lays `children` out left to right.
pub fn HBox(spec: BoxSpec, children: Vec<AnyElement>) -> AnyElement {
    Box::new(LinearLayout::new(Axis::Horizontal, spec, children))
}

/// Lays `children` out top to bottom.
pub fn VBox(spec: BoxSpec, children: Vec<AnyElement>) -> AnyElement {
    Box::new(LinearLayout::new(Axis::Vertical, spec, children))
}
