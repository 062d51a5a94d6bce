//! The render tree: positioned, sized and styled output of layout.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use trellis_core::ElementKey;
use trellis_foundation::UiEvent;
use trellis_ui_graphics::{Color, EdgeInsets, FontConfig, Point, Rect, Size};

use crate::UiError;

bitflags! {
    /// Behavioural flags of a render node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Children are clipped to the node's bounds when painted.
        const CLIP       = 0b0001;
        /// The node is a target for wheel events.
        const CAN_SCROLL = 0b0010;
        /// Invisible to hit testing; used for decorative sub-nodes.
        const SHADOW     = 0b0100;
        /// Pointer down on the node moves keyboard focus to it.
        const FOCUSABLE  = 0b1000;
    }
}

/// What kind of element produced a node. Used for debugging and for paint
/// decisions that depend on the node's role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Box,
    Text,
    TextLine,
    Square,
    Icon,
    Spacer,
    Grid,
    Scroll,
    TextInput,
    Caret,
    Selection,
}

/// Handler invoked with an event whose position is in the node's local
/// space. Returns whether the event was consumed.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&UiEvent) -> Result<bool, UiError>>);

impl EventHandler {
    pub fn new(handler: impl Fn(&UiEvent) -> Result<bool, UiError> + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: &UiEvent) -> Result<bool, UiError> {
        (self.0)(event)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}

/// Colours that replace the defaults while a node is hovered or focused.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateStyle {
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub text_color: Option<Color>,
}

/// Visual style resolved for a node at layout time.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub text_color: Color,
    pub hover: Option<StateStyle>,
    pub focus: Option<StateStyle>,
    pub font: FontConfig,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            background: None,
            border_color: None,
            text_color: Color::BLACK,
            hover: None,
            focus: None,
            font: FontConfig::default(),
        }
    }
}

/// Colours to paint with once hover and focus are known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub text_color: Color,
}

impl NodeStyle {
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_font(mut self, font: FontConfig) -> Self {
        self.font = font;
        self
    }

    pub fn with_hover(mut self, hover: StateStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    pub fn with_focus(mut self, focus: StateStyle) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Applies the hover overrides, then the focus overrides, on top of the
    /// defaults. Focus wins where both set a colour.
    pub fn resolve(&self, hovered: bool, focused: bool) -> ResolvedStyle {
        let mut resolved = ResolvedStyle {
            background: self.background,
            border_color: self.border_color,
            text_color: self.text_color,
        };
        let overrides = [
            self.hover.filter(|_| hovered),
            self.focus.filter(|_| focused),
        ];
        for state in overrides.into_iter().flatten() {
            if let Some(background) = state.background {
                resolved.background = Some(background);
            }
            if let Some(border) = state.border_color {
                resolved.border_color = Some(border);
            }
            if let Some(text) = state.text_color {
                resolved.text_color = text;
            }
        }
        resolved
    }
}

/// A run of text painted at the node's baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub value: String,
    pub font: FontConfig,
}

/// One node of the render tree.
///
/// Positions are relative to the parent; children are expressed in this
/// node's local space. Nodes are built through [`RenderNodeBuilder`] and a
/// parent only ever sets a child's position via [`RenderNode::placed_at`].
#[derive(Clone, Debug)]
pub struct RenderNode {
    pub key: ElementKey,
    pub kind: NodeKind,
    pub position: Point,
    pub size: Size,
    pub baseline: f32,
    /// Origin of the content box (margin, border and padding removed).
    pub content_offset: Point,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
    pub children: Vec<RenderNode>,
    pub handler: Option<EventHandler>,
    pub flags: NodeFlags,
    pub text: Option<TextRun>,
}

impl RenderNode {
    pub fn builder(key: ElementKey, kind: NodeKind) -> RenderNodeBuilder {
        RenderNodeBuilder::new(key, kind)
    }

    /// Moves the node to `position` in its parent's space.
    pub fn placed_at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Bounds in the parent's space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Bounds in the node's own space.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// The border box: local bounds minus the margin.
    pub fn border_box(&self) -> Rect {
        self.local_bounds().inset(self.margin)
    }

    pub fn is_shadow(&self) -> bool {
        self.flags.contains(NodeFlags::SHADOW)
    }

    pub fn can_scroll(&self) -> bool {
        self.flags.contains(NodeFlags::CAN_SCROLL)
    }

    pub fn is_focusable(&self) -> bool {
        self.flags.contains(NodeFlags::FOCUSABLE)
    }

    /// Total number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::count).sum::<usize>()
    }
}

/// Assembles a [`RenderNode`]. Everything a node refers to (children,
/// handler, style) is computed before `build` is called.
#[derive(Debug)]
pub struct RenderNodeBuilder {
    node: RenderNode,
}

impl RenderNodeBuilder {
    pub fn new(key: ElementKey, kind: NodeKind) -> Self {
        Self {
            node: RenderNode {
                key,
                kind,
                position: Point::ZERO,
                size: Size::ZERO,
                baseline: 0.0,
                content_offset: Point::ZERO,
                margin: EdgeInsets::ZERO,
                border: EdgeInsets::ZERO,
                padding: EdgeInsets::ZERO,
                style: NodeStyle::default(),
                children: Vec::new(),
                handler: None,
                flags: NodeFlags::empty(),
                text: None,
            },
        }
    }

    pub fn size(mut self, size: Size) -> Self {
        self.node.size = size;
        self
    }

    pub fn baseline(mut self, baseline: f32) -> Self {
        self.node.baseline = baseline;
        self
    }

    /// Sets margin, border and padding; the content offset follows.
    pub fn insets(mut self, margin: EdgeInsets, border: EdgeInsets, padding: EdgeInsets) -> Self {
        self.node.margin = margin;
        self.node.border = border;
        self.node.padding = padding;
        self.node.content_offset = (margin + border + padding).top_left();
        self
    }

    pub fn style(mut self, style: NodeStyle) -> Self {
        self.node.style = style;
        self
    }

    pub fn children(mut self, children: Vec<RenderNode>) -> Self {
        self.node.children = children;
        self
    }

    pub fn child(mut self, child: RenderNode) -> Self {
        self.node.children.push(child);
        self
    }

    pub fn handler(mut self, handler: Option<EventHandler>) -> Self {
        self.node.handler = handler;
        self
    }

    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.node.flags |= flags;
        self
    }

    pub fn text(mut self, value: impl Into<String>, font: FontConfig) -> Self {
        self.node.text = Some(TextRun {
            value: value.into(),
            font,
        });
        self
    }

    pub fn build(self) -> RenderNode {
        self.node
    }
}
