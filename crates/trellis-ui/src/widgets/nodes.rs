//! Leaf elements backing the widget factories.

use trellis_ui_graphics::{Color, FontConfig, Size};
use trellis_ui_layout::{Axis, Constraints, LayoutError, SelfLayout};

use crate::element::{require_bounded, Element, LayoutContext};
use crate::render_node::{NodeKind, NodeStyle, RenderNode};

/// A solid square of fixed side.
#[derive(Clone, Debug)]
pub struct SquareElement {
    pub side: f32,
    pub color: Color,
}

impl Element for SquareElement {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        _constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(None, |_, key| {
            Ok(RenderNode::builder(key.clone(), NodeKind::Square)
                .size(Size::new(self.side, self.side))
                .style(NodeStyle::default().with_background(self.color))
                .build())
        })
    }
}

/// A single glyph drawn with a font, sized by measuring it.
#[derive(Clone, Debug)]
pub struct IconElement {
    pub glyph: String,
    pub font: FontConfig,
    pub color: Color,
}

impl Element for IconElement {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        _constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(None, |cx, key| {
            let metrics = cx.measure_text(&self.glyph, &self.font);
            Ok(RenderNode::builder(key.clone(), NodeKind::Icon)
                .size(metrics.size)
                .baseline(metrics.baseline)
                .style(
                    NodeStyle::default()
                        .with_text_color(self.color)
                        .with_font(self.font.clone()),
                )
                .text(self.glyph.as_str(), self.font.clone())
                .build())
        })
    }
}

/// Empty flexible element. Takes whatever space its constraints grow into
/// and nothing otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpacerElement;

impl SpacerElement {
    fn extent(constraints: &Constraints, axis: Axis) -> f32 {
        match constraints.mode(axis) {
            SelfLayout::Grow => axis.main_of(constraints.available),
            SelfLayout::Shrink => 0.0,
        }
    }
}

impl Element for SpacerElement {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(None, |_, key| {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let grows = constraints.mode(axis) == SelfLayout::Grow;
                require_bounded(key, &constraints, axis, grows)?;
            }
            let size = Size::new(
                Self::extent(&constraints, Axis::Horizontal),
                Self::extent(&constraints, Axis::Vertical),
            );
            Ok(RenderNode::builder(key.clone(), NodeKind::Spacer)
                .size(size)
                .build())
        })
    }

    fn is_flexible(&self) -> bool {
        true
    }
}
