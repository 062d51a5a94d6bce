//! Grid widget implementation

#![allow(non_snake_case)]

use crate::element::AnyElement;
use crate::layout::{GridLayout, GridSpec};

/// Fills `spec.columns` uniform cells per row with `children`, in order.
pub fn Grid(spec: GridSpec, children: Vec<AnyElement>) -> AnyElement {
    Box::new(GridLayout::new(spec, children))
}
