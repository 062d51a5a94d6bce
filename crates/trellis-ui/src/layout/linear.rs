//! Horizontal and vertical box layout.
//!
//! A box stacks its children along a main axis. Along each axis it either
//! grows to fill the offered space or shrinks to its content. When the main
//! axis grows, the space fixed children leave over is split evenly between
//! flexible children (spacers and boxes marked flexible).

use trellis_foundation::UiEvent;
use trellis_ui_graphics::{Color, EdgeInsets, Point, Size};
use trellis_ui_layout::{
    Axis, Constraints, CrossAxisAlignment, LayoutError, MainAxisAlignment, SelfLayout,
};

use crate::element::{content_space, require_bounded, AnyElement, Element, LayoutContext};
use crate::render_node::{EventHandler, NodeFlags, NodeKind, NodeStyle, RenderNode, StateStyle};
use crate::UiError;

/// Configuration of a horizontal or vertical box.
///
/// Self-layout options left at `None` inherit the mode the parent's
/// constraints carry for that axis.
#[derive(Clone, Debug, Default)]
pub struct BoxSpec {
    pub key: Option<String>,
    pub main_axis_self_layout: Option<SelfLayout>,
    pub cross_axis_self_layout: Option<SelfLayout>,
    pub main_axis_alignment: MainAxisAlignment,
    pub cross_axis_alignment: CrossAxisAlignment,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
    pub flexible: bool,
    pub clip: bool,
    pub on_event: Option<EventHandler>,
}

impl BoxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit identity, replacing the positional key segment.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn main_axis_self_layout(mut self, mode: SelfLayout) -> Self {
        self.main_axis_self_layout = Some(mode);
        self
    }

    pub fn cross_axis_self_layout(mut self, mode: SelfLayout) -> Self {
        self.cross_axis_self_layout = Some(mode);
        self
    }

    /// Grow on both axes.
    pub fn fill(self) -> Self {
        self.main_axis_self_layout(SelfLayout::Grow)
            .cross_axis_self_layout(SelfLayout::Grow)
    }

    pub fn main_axis_alignment(mut self, alignment: MainAxisAlignment) -> Self {
        self.main_axis_alignment = alignment;
        self
    }

    pub fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_axis_alignment = alignment;
        self
    }

    pub fn margin(mut self, margin: EdgeInsets) -> Self {
        self.margin = margin;
        self
    }

    pub fn border(mut self, border: EdgeInsets) -> Self {
        self.border = border;
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = Some(color);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.style.border_color = Some(color);
        self
    }

    pub fn hover_background(mut self, color: Color) -> Self {
        let hover = self.style.hover.get_or_insert_with(StateStyle::default);
        hover.background = Some(color);
        self
    }

    /// Absorb leftover space when placed in a growing box.
    pub fn flexible(mut self) -> Self {
        self.flexible = true;
        self
    }

    pub fn clip(mut self) -> Self {
        self.clip = true;
        self
    }

    pub fn on_event(
        mut self,
        handler: impl Fn(&UiEvent) -> Result<bool, UiError> + 'static,
    ) -> Self {
        self.on_event = Some(EventHandler::new(handler));
        self
    }

    /// Margin, border and padding combined.
    pub fn insets(&self) -> EdgeInsets {
        self.margin + self.border + self.padding
    }
}

/// A box stacking its children along `axis`.
pub struct LinearLayout {
    axis: Axis,
    spec: BoxSpec,
    children: Vec<AnyElement>,
}

impl LinearLayout {
    pub fn new(axis: Axis, spec: BoxSpec, children: Vec<AnyElement>) -> Self {
        Self {
            axis,
            spec,
            children,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn measure_children(
        &self,
        cx: &mut LayoutContext<'_>,
        content: Size,
        main_grows: bool,
    ) -> Result<Vec<RenderNode>, LayoutError> {
        let axis = self.axis;
        let cross_available = axis.cross_of(content);
        let child_constraints = Constraints::shrink(content);

        let (flexible, fixed): (Vec<usize>, Vec<usize>) =
            (0..self.children.len()).partition(|&index| self.children[index].is_flexible());

        let mut measured: Vec<Option<RenderNode>> =
            (0..self.children.len()).map(|_| None).collect();
        let mut fixed_main = 0.0_f32;
        for &index in &fixed {
            let node = cx.layout_child(index, self.children[index].as_ref(), child_constraints)?;
            fixed_main += axis.main_of(node.size);
            measured[index] = Some(node);
        }

        if !flexible.is_empty() {
            let flexible_constraints = if main_grows {
                let leftover = (axis.main_of(content) - fixed_main).max(0.0);
                let share = leftover / flexible.len() as f32;
                Constraints::shrink(axis.size(share, cross_available))
                    .with_mode(axis, SelfLayout::Grow)
            } else {
                child_constraints
            };
            for &index in &flexible {
                let node =
                    cx.layout_child(index, self.children[index].as_ref(), flexible_constraints)?;
                measured[index] = Some(node);
            }
        }

        Ok(measured.into_iter().flatten().collect())
    }
}

impl Element for LinearLayout {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(self.spec.key.as_deref(), |cx, key| {
            let axis = self.axis;
            let cross = axis.cross();
            let main_mode = self
                .spec
                .main_axis_self_layout
                .unwrap_or_else(|| constraints.mode(axis));
            let cross_mode = self
                .spec
                .cross_axis_self_layout
                .unwrap_or_else(|| constraints.mode(cross));
            let main_grows = main_mode == SelfLayout::Grow;
            let cross_grows = cross_mode == SelfLayout::Grow;
            require_bounded(key, &constraints, axis, main_grows)?;
            require_bounded(key, &constraints, cross, cross_grows)?;

            let insets = self.spec.insets();
            let content = content_space(key, &constraints, insets);
            let children = self.measure_children(cx, content, main_grows)?;

            let sizes: Vec<f32> = children.iter().map(|c| axis.main_of(c.size)).collect();
            let natural_main: f32 = sizes.iter().sum();
            let natural_cross = children
                .iter()
                .map(|c| axis.cross_of(c.size))
                .fold(0.0_f32, f32::max);
            let main_size = if main_grows {
                axis.main_of(content)
            } else {
                natural_main
            };
            let cross_size = if cross_grows {
                axis.cross_of(content)
            } else {
                natural_cross
            };

            let mut positions = vec![0.0; sizes.len()];
            self.spec
                .main_axis_alignment
                .arrange(main_size, &sizes, &mut positions);

            let origin = insets.top_left();
            let placed: Vec<RenderNode> = children
                .into_iter()
                .zip(positions)
                .map(|(child, main_position)| {
                    let cross_position = self
                        .spec
                        .cross_axis_alignment
                        .align(cross_size, axis.cross_of(child.size));
                    let offset = axis.point(main_position, cross_position);
                    child.placed_at(Point::new(origin.x + offset.x, origin.y + offset.y))
                })
                .collect();

            let baseline = placed
                .first()
                .map(|first| first.position.y + first.baseline)
                .unwrap_or(origin.y);
            let size = axis.size(main_size, cross_size).outset(insets);
            log::trace!("{key}: {axis:?} box {}x{}", size.width, size.height);

            let mut flags = NodeFlags::empty();
            if self.spec.clip {
                flags |= NodeFlags::CLIP;
            }
            Ok(RenderNode::builder(key.clone(), NodeKind::Box)
                .size(size)
                .baseline(baseline)
                .insets(self.spec.margin, self.spec.border, self.spec.padding)
                .style(self.spec.style.clone())
                .children(placed)
                .handler(self.spec.on_event.clone())
                .flags(flags)
                .build())
        })
    }

    fn is_flexible(&self) -> bool {
        self.spec.flexible
    }
}

#[cfg(test)]
#[path = "tests/linear_tests.rs"]
mod tests;
