//! Spacer widget implementation

#![allow(non_snake_case)]

use super::nodes::SpacerElement;
use crate::element::AnyElement;

/// Flexible filler. Inside a growing box it takes an even share of the
/// space left by its fixed siblings.
pub fn Spacer() -> AnyElement {
    Box::new(SpacerElement)
}
