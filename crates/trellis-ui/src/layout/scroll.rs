//! Scroll viewport.
//!
//! The viewport grows along its scroll axis and lays its child out without
//! a bound on that axis. The offset lives in the state cache under
//! [`SCROLL_OFFSET_SLOT`] and is clamped to the child's overflow on every
//! pass, so content that shrinks never leaves the viewport scrolled past
//! its end.

use trellis_foundation::UiEvent;
use trellis_ui_graphics::{Color, EdgeInsets, Point, Size};
use trellis_ui_layout::{Axis, Constraints, LayoutError, SelfLayout};

use crate::element::{content_space, require_bounded, AnyElement, Element, LayoutContext};
use crate::render_node::{EventHandler, NodeFlags, NodeKind, NodeStyle, RenderNode};

/// State slot holding a scroll container's offset (`f32`).
pub const SCROLL_OFFSET_SLOT: &str = "scroll-offset";

#[derive(Clone, Debug)]
pub struct ScrollSpec {
    pub key: Option<String>,
    pub axis: Axis,
    /// Multiplier applied to wheel deltas.
    pub wheel_factor: f32,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
}

impl Default for ScrollSpec {
    fn default() -> Self {
        Self {
            key: None,
            axis: Axis::Vertical,
            wheel_factor: 1.0,
            margin: EdgeInsets::ZERO,
            border: EdgeInsets::ZERO,
            padding: EdgeInsets::ZERO,
            style: NodeStyle::default(),
        }
    }
}

impl ScrollSpec {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn wheel_factor(mut self, factor: f32) -> Self {
        self.wheel_factor = factor;
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn border(mut self, border: EdgeInsets, color: Color) -> Self {
        self.border = border;
        self.style.border_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = Some(color);
        self
    }
}

pub struct ScrollContainer {
    spec: ScrollSpec,
    child: AnyElement,
}

impl ScrollContainer {
    pub fn new(spec: ScrollSpec, child: AnyElement) -> Self {
        Self { spec, child }
    }
}

impl Element for ScrollContainer {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(self.spec.key.as_deref(), |cx, key| {
            let axis = self.spec.axis;
            let cross = axis.cross();
            let cross_grows = constraints.mode(cross) == SelfLayout::Grow;
            require_bounded(key, &constraints, axis, true)?;
            require_bounded(key, &constraints, cross, cross_grows)?;

            let insets = self.spec.margin + self.spec.border + self.spec.padding;
            let content = content_space(key, &constraints, insets);
            let viewport = axis.main_of(content);
            let child_constraints =
                Constraints::shrink(axis.size(f32::INFINITY, axis.cross_of(content)));
            let child = cx.layout_child(0, self.child.as_ref(), child_constraints)?;

            let overflow = (axis.main_of(child.size) - viewport).max(0.0);
            let (stored, offset_setter) = cx.state().use_state(SCROLL_OFFSET_SLOT, || 0.0_f32);
            let offset = stored.clamp(0.0, overflow);
            if offset != stored {
                offset_setter.set(offset);
            }

            let origin = insets.top_left();
            let shift = axis.point(offset, 0.0);
            let child = child.placed_at(Point::new(origin.x - shift.x, origin.y - shift.y));

            let cross_size = if cross_grows {
                axis.cross_of(content)
            } else {
                axis.cross_of(child.size)
            };
            let size: Size = axis.size(viewport, cross_size).outset(insets);

            let frames = cx.frame_requester();
            let factor = self.spec.wheel_factor;
            let handler = EventHandler::new(move |event| {
                let UiEvent::Wheel(wheel) = event else {
                    return Ok(false);
                };
                let delta = match axis {
                    Axis::Horizontal => wheel.delta.x,
                    Axis::Vertical => wheel.delta.y,
                } * factor;
                let current = offset_setter.get().unwrap_or(0.0);
                let next = (current + delta).clamp(0.0, overflow);
                if next != current {
                    offset_setter.set(next);
                    frames.request_frame();
                }
                Ok(true)
            });

            Ok(RenderNode::builder(key.clone(), NodeKind::Scroll)
                .size(size)
                .baseline(child.position.y + child.baseline)
                .insets(self.spec.margin, self.spec.border, self.spec.padding)
                .style(self.spec.style.clone())
                .child(child)
                .handler(Some(handler))
                .flags(NodeFlags::CLIP | NodeFlags::CAN_SCROLL)
                .build())
        })
    }
}
