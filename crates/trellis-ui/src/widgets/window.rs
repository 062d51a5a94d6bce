//! Window chrome widget implementation

#![allow(non_snake_case)]

use trellis_ui_graphics::{Color, EdgeInsets, FontConfig};
use trellis_ui_layout::SelfLayout;

use super::{HBox, Text, VBox};
use crate::element::{AnyElement, IntoElement};
use crate::layout::BoxSpec;
use crate::text::TextSpec;

/// A bordered frame with a title bar above `content`.
///
/// The frame takes the self layout its parent offers; the title bar spans
/// the frame's width, so the frame must sit in bounded horizontal space.
pub fn Window(title: impl Into<String>, content: impl IntoElement) -> AnyElement {
    let title_bar = HBox(
        BoxSpec::new()
            .main_axis_self_layout(SelfLayout::Grow)
            .padding(EdgeInsets::symmetric(8.0, 4.0))
            .background(Color::LIGHT_GRAY),
        vec![Text(
            title,
            TextSpec::new().font(FontConfig::default().bold()),
        )],
    );
    VBox(
        BoxSpec::new()
            .border(EdgeInsets::uniform(1.0))
            .border_color(Color::GRAY)
            .background(Color::WHITE)
            .clip(),
        vec![title_bar, content.into_element()],
    )
}
