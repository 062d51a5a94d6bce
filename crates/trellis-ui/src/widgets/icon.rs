//! Icon widget implementation

#![allow(non_snake_case)]

use trellis_ui_graphics::{Color, FontConfig};

use super::nodes::IconElement;
use crate::element::AnyElement;

/// A glyph from an icon font. Glyph tables are the caller's business; this
/// only measures and draws the string it is given.
pub fn Icon(glyph: impl Into<String>, font: FontConfig, color: Color) -> AnyElement {
    Box::new(IconElement {
        glyph: glyph.into(),
        font,
        color,
    })
}
