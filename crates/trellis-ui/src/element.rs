//! The element contract and the context threaded through a layout pass.

use trellis_core::{ElementKey, FrameRequester, KeyVendor, StateCache};
use trellis_render_common::{TextMeasurer, TextMetrics};
use trellis_ui_graphics::{EdgeInsets, FontConfig, Size};
use trellis_ui_layout::{Axis, Constraints, LayoutError};

use crate::render_node::RenderNode;

/// An immutable description of a piece of UI.
///
/// Elements are rebuilt for every pass. Constructing one has no side
/// effects; identity and state are only touched inside [`Element::layout`].
pub trait Element {
    /// Lays the element out and returns its render node, positioned at the
    /// origin. The parent places it.
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError>;

    /// Flexible elements absorb the leftover main-axis space of a growing
    /// box.
    fn is_flexible(&self) -> bool {
        false
    }
}

pub type AnyElement = Box<dyn Element>;

/// Conversion into a boxed element, so factories accept both concrete
/// elements and already boxed ones.
pub trait IntoElement {
    fn into_element(self) -> AnyElement;
}

impl<E: Element + 'static> IntoElement for E {
    fn into_element(self) -> AnyElement {
        Box::new(self)
    }
}

impl IntoElement for AnyElement {
    fn into_element(self) -> AnyElement {
        self
    }
}

/// Everything an element may consult while laying out: the key vendor, the
/// state cache, text measurement and the redraw requester for handlers.
pub struct LayoutContext<'a> {
    keys: &'a mut KeyVendor,
    state: &'a StateCache,
    measurer: &'a dyn TextMeasurer,
    frames: FrameRequester,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        keys: &'a mut KeyVendor,
        state: &'a StateCache,
        measurer: &'a dyn TextMeasurer,
        frames: FrameRequester,
    ) -> Self {
        Self {
            keys,
            state,
            measurer,
            frames,
        }
    }

    pub fn state(&self) -> &StateCache {
        self.state
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer
    }

    pub fn frame_requester(&self) -> FrameRequester {
        self.frames.clone()
    }

    pub fn measure_text(&self, text: &str, font: &FontConfig) -> TextMetrics {
        self.measurer.measure_text(text, font)
    }

    /// Lays out `root` as a fresh pass: keys restart from the root frame and
    /// the state cache opens a new collection generation. Sweeping is left
    /// to the caller once the pass succeeded.
    pub fn layout_root(
        &mut self,
        root: &dyn Element,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        self.keys.start();
        self.state.begin_pass();
        root.layout(self, constraints)
    }

    /// Claims a key for the element being laid out and runs `body` inside
    /// its key and state scopes. Scopes are closed even when `body` fails.
    pub fn scoped<R>(
        &mut self,
        explicit: Option<&str>,
        body: impl FnOnce(&mut Self, &ElementKey) -> Result<R, LayoutError>,
    ) -> Result<R, LayoutError> {
        let key = self.keys.next_key_for(explicit)?;
        self.keys.start_element();
        self.state.start_element(&key);
        let result = body(self, &key);
        self.state.end_element();
        self.keys.end_element();
        result
    }

    /// Lays out the child at `index` of the current element, keeping its key
    /// positional even when children are visited out of order.
    pub fn layout_child(
        &mut self,
        index: usize,
        child: &dyn Element,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        self.keys.seek_child(index)?;
        let node = child.layout(self, constraints)?;
        check_geometry(&node)?;
        Ok(node)
    }
}

/// Rejects nodes whose size is NaN, infinite or negative.
pub fn check_geometry(node: &RenderNode) -> Result<(), LayoutError> {
    if node.size.is_valid() {
        return Ok(());
    }
    Err(LayoutError::InvalidGeometry {
        key: node.key.to_string(),
        width: node.size.width,
        height: node.size.height,
    })
}

/// Fails with [`LayoutError::UnboundedGrow`] when `axis` grows into
/// unbounded space.
pub fn require_bounded(
    key: &ElementKey,
    constraints: &Constraints,
    axis: Axis,
    grows: bool,
) -> Result<(), LayoutError> {
    if grows && !constraints.is_bounded(axis) {
        return Err(LayoutError::UnboundedGrow {
            key: key.to_string(),
            axis,
        });
    }
    Ok(())
}

/// The space inside `available` once `insets` are removed. Insets wider
/// than the space leave an invalid size; that is logged and clamped to zero.
pub fn content_space(key: &ElementKey, constraints: &Constraints, insets: EdgeInsets) -> Size {
    let content = constraints.content_space(insets);
    let degenerate = |value: f32| value.is_nan() || value < 0.0;
    if degenerate(content.width) || degenerate(content.height) {
        log::warn!(
            "insets of {key} exceed the available space ({}x{}); clamping content to zero",
            constraints.available.width,
            constraints.available.height
        );
        return content.clamp_non_negative();
    }
    content
}
