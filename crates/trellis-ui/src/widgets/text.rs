//! Text widget implementation

#![allow(non_snake_case)]

use crate::element::AnyElement;
use crate::text::{TextElement, TextSpec};

pub fn Text(value: impl Into<String>, spec: TextSpec) -> AnyElement {
    Box::new(TextElement::new(value, spec))
}
