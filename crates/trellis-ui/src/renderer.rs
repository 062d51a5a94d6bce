//! Paints a render tree onto a [`Surface`].

use trellis_core::ElementKey;
use trellis_render_common::Surface;
use trellis_ui_graphics::{Point, Rect};

use crate::render_node::{NodeFlags, RenderNode};

/// Interaction state that changes how nodes are painted.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    pub hovered: Option<ElementKey>,
    pub focused: Option<ElementKey>,
}

impl Interaction {
    pub fn new(hovered: Option<ElementKey>, focused: Option<ElementKey>) -> Self {
        Self { hovered, focused }
    }

    fn is_hovered(&self, key: &ElementKey) -> bool {
        self.hovered.as_ref() == Some(key)
    }

    fn is_focused(&self, key: &ElementKey) -> bool {
        self.focused.as_ref() == Some(key)
    }
}

/// Paints `root` and its subtree, children over parents in order.
pub fn paint(root: &RenderNode, surface: &mut dyn Surface, interaction: &Interaction) {
    paint_node(root, surface, interaction);
}

fn paint_node(node: &RenderNode, surface: &mut dyn Surface, interaction: &Interaction) {
    if !node.bounds().is_valid() || !node.position.is_finite() {
        log::warn!(
            "skipping {} ({:?}) with invalid bounds {:?}",
            node.key,
            node.kind,
            node.bounds()
        );
        return;
    }

    let style = node.style.resolve(
        interaction.is_hovered(&node.key),
        interaction.is_focused(&node.key),
    );

    surface.save();
    surface.translate(node.position.x, node.position.y);

    let border_box = node.border_box();
    if let Some(background) = style.background {
        surface.fill_rect(border_box, background);
    }
    if let Some(color) = style.border_color {
        let width = border_width(node);
        if width > 0.0 {
            surface.stroke_bounds(border_box, color, width);
        }
    }
    if let Some(run) = &node.text {
        let origin = Point::new(node.content_offset.x, node.baseline);
        surface.fill_text(&run.value, origin, &run.font, style.text_color);
    }

    if !node.children.is_empty() {
        if node.flags.contains(NodeFlags::CLIP) {
            surface.clip_rect(Rect::from_size(node.size).inset(node.margin + node.border));
        }
        for child in &node.children {
            paint_node(child, surface, interaction);
        }
    }

    surface.restore();
}

/// Strokes use the widest border edge; per-edge widths are not drawn.
fn border_width(node: &RenderNode) -> f32 {
    let border = node.border;
    border.top.max(border.right).max(border.bottom).max(border.left)
}
