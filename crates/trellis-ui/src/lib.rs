//! Elements, layout, text editing, hit testing and painting for Trellis.
//!
//! An element tree is laid out through a [`LayoutContext`] into a tree of
//! [`RenderNode`]s, which [`renderer::paint`] draws and the functions in
//! [`hit_test`] search when routing input.

mod debug;
mod element;
mod error;
pub mod layout;
mod render_node;
pub mod renderer;
pub mod text;
pub mod widgets;

pub use element::{
    check_geometry, content_space, require_bounded, AnyElement, Element, IntoElement,
    LayoutContext,
};
pub use error::{EditError, UiError};
pub use hit_test::{
    find_path_to_node_at_point, find_path_to_node_by_key, find_path_to_scroll_target_at_point,
    NodePath,
};
pub use layout::{
    BoxSpec, GridLayout, GridSpec, LinearLayout, ScrollContainer, ScrollSpec, SCROLL_OFFSET_SLOT,
};
pub use render_node::{
    EventHandler, NodeFlags, NodeKind, NodeStyle, RenderNode, RenderNodeBuilder, ResolvedStyle,
    StateStyle, TextRun,
};
pub use renderer::{paint, Interaction};
pub use text::{
    ActionTable, EditOutcome, Keymap, TextMode, TextModel, TextPoint, TextSelection, TextSpec,
};
pub use widgets::{
    Grid, HBox, Icon, Scroll, Spacer, Square, Text, TextInput, TextInputSpec, VBox, Window,
    CURSOR_SLOT, SELECTION_SLOT, TEXT_SLOT,
};

// Debug utilities
pub use debug::{format_render_tree, log_pass_summary, log_render_tree};

pub use trellis_core::{ElementKey, FrameRequester, KeyVendor, StateCache};
pub use trellis_foundation::FOCUSED_SLOT;
pub use trellis_ui_layout::{
    Axis, Constraints, CrossAxisAlignment, LayoutError, MainAxisAlignment, SelfLayout,
};
