//! Scroll widget implementation

#![allow(non_snake_case)]

use crate::element::{AnyElement, IntoElement};
use crate::layout::{ScrollContainer, ScrollSpec};

pub fn Scroll(spec: ScrollSpec, child: impl IntoElement) -> AnyElement {
    Box::new(ScrollContainer::new(spec, child.into_element()))
}
