//! The scene orchestrator: runs layout, paints the render tree and routes
//! input events to it.
//!
//! A frame is `layout` followed by `redraw`. Event handlers never re-enter
//! the shell; they mutate state and return whether they consumed the event.
//! A consumed event schedules a frame, as does any handler asking through
//! the runtime's [`FrameRequester`](trellis_core::FrameRequester). The host
//! loop calls [`AppShell::update`] whenever [`AppShell::should_render`]
//! reports a pending request.

use trellis_core::{ElementKey, KeyVendor, StateCache};
use trellis_foundation::{
    FocusManager, KeyEvent, PointerButton, PointerButtons, PointerEvent, PointerEventKind,
    UiEvent, WheelEvent,
};
use trellis_render_common::Surface;
use trellis_runtime_std::StdRuntime;
use trellis_ui::{
    check_geometry, find_path_to_node_at_point, find_path_to_node_by_key,
    find_path_to_scroll_target_at_point, log_pass_summary, log_render_tree, paint, AnyElement,
    Interaction, LayoutContext, RenderNode, UiError,
};
use trellis_ui_graphics::{Color, Point, Rect, Size};
use trellis_ui_layout::Constraints;

/// Host-facing settings of a shell.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellConfig {
    pub viewport: Size,
    /// Cleared behind the tree at the start of every frame.
    pub background: Option<Color>,
    /// Dumps the render tree at debug level after each successful pass.
    pub log_render_tree: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            background: Some(Color::WHITE),
            log_render_tree: false,
        }
    }
}

pub struct AppShell<S: Surface> {
    runtime: StdRuntime,
    content: Box<dyn Fn() -> AnyElement>,
    surface: S,
    keys: KeyVendor,
    state: StateCache,
    focus: FocusManager,
    config: ShellConfig,
    cursor: Point,
    buttons: PointerButtons,
    hovered: Option<ElementKey>,
    tree: Option<RenderNode>,
}

impl<S: Surface> AppShell<S> {
    pub fn new(surface: S, content: impl Fn() -> AnyElement + 'static) -> Self {
        Self::with_config(surface, ShellConfig::default(), content)
    }

    pub fn with_config(
        surface: S,
        config: ShellConfig,
        content: impl Fn() -> AnyElement + 'static,
    ) -> Self {
        let mut shell = Self {
            runtime: StdRuntime::new(),
            content: Box::new(content),
            surface,
            keys: KeyVendor::new(),
            state: StateCache::new(),
            focus: FocusManager::new(),
            config,
            cursor: Point::ZERO,
            buttons: PointerButtons::NONE,
            hovered: None,
            tree: None,
        };
        if let Err(err) = shell.layout() {
            log::error!("initial layout failed: {err}");
        }
        shell.request_frame();
        shell
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.config.viewport = Size::new(width, height);
        if let Err(err) = self.layout() {
            log::error!("layout after resize failed: {err}");
        }
        self.request_frame();
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn runtime(&self) -> &StdRuntime {
        &self.runtime
    }

    pub fn state(&self) -> &StateCache {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The render tree of the last successful pass.
    pub fn tree(&self) -> Option<&RenderNode> {
        self.tree.as_ref()
    }

    pub fn focused(&self) -> Option<&ElementKey> {
        self.focus.focused()
    }

    pub fn hovered(&self) -> Option<&ElementKey> {
        self.hovered.as_ref()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Returns whether a redraw was requested since the last poll.
    pub fn should_render(&self) -> bool {
        self.runtime.take_frame_request()
    }

    /// Runs a full frame: layout, then paint. A failed layout keeps painting
    /// the previous tree.
    pub fn update(&mut self) {
        if let Err(err) = self.layout() {
            log::error!("layout failed: {err}");
        }
        self.redraw();
    }

    /// Lays the whole content out against the viewport.
    ///
    /// On success the state of elements that did not take part in the pass
    /// is swept and the tree replaced. On failure nothing is swept and the
    /// previous tree stays current.
    pub fn layout(&mut self) -> Result<(), UiError> {
        let root = (self.content)();
        let constraints = Constraints::grow(self.config.viewport);
        let mut cx = LayoutContext::new(
            &mut self.keys,
            &self.state,
            &self.surface,
            self.runtime.frame_requester(),
        );
        let node = cx.layout_root(root.as_ref(), constraints)?;
        check_geometry(&node)?;

        self.state.sweep();
        self.focus.retain_live(&self.state);
        if let Some(hovered) = &self.hovered {
            if find_path_to_node_by_key(hovered, &node).is_none() {
                self.hovered = None;
            }
        }
        log_pass_summary(&node);
        if self.config.log_render_tree {
            log_render_tree(&node);
        }
        self.tree = Some(node);
        Ok(())
    }

    /// Paints the current tree onto the surface.
    pub fn redraw(&mut self) {
        self.surface.begin_frame();
        if let Some(background) = self.config.background {
            self.surface
                .fill_rect(Rect::from_size(self.config.viewport), background);
        }
        if let Some(tree) = &self.tree {
            let interaction = Interaction::new(self.hovered.clone(), self.focus.focused().cloned());
            paint(tree, &mut self.surface, &interaction);
        }
    }

    /// Moves the pointer and delivers a move event. Returns whether a
    /// handler consumed it.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Result<bool, UiError> {
        self.cursor = Point::new(x, y);
        self.update_hover();
        self.dispatch_pointer(PointerEventKind::Move)
    }

    /// Presses the primary button at the cursor. Focus moves to the nearest
    /// focusable node under the cursor, or is cleared when there is none.
    pub fn pointer_pressed(&mut self) -> Result<bool, UiError> {
        self.buttons.insert(PointerButton::Primary);
        let target = self.tree.as_ref().and_then(|tree| {
            let path = find_path_to_node_at_point(self.cursor, tree)?;
            path.nodes()
                .iter()
                .find(|node| node.is_focusable())
                .map(|node| node.key.clone())
        });
        self.move_focus(target)?;
        self.dispatch_pointer(PointerEventKind::Down)
    }

    pub fn pointer_released(&mut self) -> Result<bool, UiError> {
        self.buttons.remove(PointerButton::Primary);
        self.dispatch_pointer(PointerEventKind::Up)
    }

    /// Scrolls the deepest scrollable node under the cursor.
    pub fn wheel(&mut self, dx: f32, dy: f32) -> Result<bool, UiError> {
        let Some(tree) = &self.tree else {
            return Ok(false);
        };
        let Some(path) = find_path_to_scroll_target_at_point(self.cursor, tree) else {
            return Ok(false);
        };
        let event = UiEvent::Wheel(WheelEvent::new(self.cursor, Point::new(dx, dy)));
        let consumed = path.dispatch(&event)?;
        Ok(self.schedule_if(consumed))
    }

    /// Delivers a key press to the focused node, bubbling to its ancestors.
    /// An unconsumed `Tab` moves focus to the next focusable node, `Shift+Tab`
    /// to the previous one.
    pub fn key_pressed(&mut self, event: KeyEvent) -> Result<bool, UiError> {
        let is_tab = event.key == "Tab";
        let backwards = event.shift();
        let consumed = match (&self.tree, self.focus.focused()) {
            (Some(tree), Some(focused)) => match find_path_to_node_by_key(focused, tree) {
                Some(path) => path
                    .dispatch_to_nearest_handler(&UiEvent::Key(event))?
                    .is_some(),
                None => false,
            },
            _ => false,
        };
        if !consumed && is_tab {
            return self.cycle_focus(backwards);
        }
        Ok(self.schedule_if(consumed))
    }

    /// Moves keyboard focus to `key`, or clears it with `None`. The node
    /// losing focus and the node gaining it each receive a focus event.
    pub fn move_focus(&mut self, key: Option<ElementKey>) -> Result<(), UiError> {
        let previous = match &key {
            Some(next) if self.focus.is_focused(next) => return Ok(()),
            Some(next) => self.focus.request_focus(next.clone(), &self.state),
            None => match self.focus.clear_focus(&self.state) {
                Some(previous) => Some(previous),
                None => return Ok(()),
            },
        };
        if let Some(previous) = previous {
            self.send_to(&previous, &UiEvent::Focus(false))?;
        }
        if let Some(next) = key {
            self.send_to(&next, &UiEvent::Focus(true))?;
        }
        self.request_frame();
        Ok(())
    }

    fn cycle_focus(&mut self, backwards: bool) -> Result<bool, UiError> {
        let mut focusable = Vec::new();
        if let Some(tree) = &self.tree {
            collect_focusable(tree, &mut focusable);
        }
        if focusable.is_empty() {
            return Ok(false);
        }
        let current = self
            .focus
            .focused()
            .and_then(|focused| focusable.iter().position(|key| key == focused));
        let count = focusable.len();
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => count - 1,
            (Some(index), false) => (index + 1) % count,
            (Some(index), true) => (index + count - 1) % count,
        };
        self.move_focus(Some(focusable.swap_remove(next)))?;
        Ok(true)
    }

    fn send_to(&self, key: &ElementKey, event: &UiEvent) -> Result<bool, UiError> {
        match self
            .tree
            .as_ref()
            .and_then(|tree| find_path_to_node_by_key(key, tree))
        {
            Some(path) => path.dispatch(event),
            None => Ok(false),
        }
    }

    fn dispatch_pointer(&self, kind: PointerEventKind) -> Result<bool, UiError> {
        let Some(tree) = &self.tree else {
            return Ok(false);
        };
        let Some(path) = find_path_to_node_at_point(self.cursor, tree) else {
            return Ok(false);
        };
        let event = UiEvent::Pointer(PointerEvent::new(kind, self.cursor).with_buttons(self.buttons));
        let consumed = path.dispatch_to_nearest_handler(&event)?.is_some();
        Ok(self.schedule_if(consumed))
    }

    /// Hover belongs to the nearest node under the cursor that restyles
    /// itself on hover.
    fn update_hover(&mut self) {
        let hovered = self.tree.as_ref().and_then(|tree| {
            let path = find_path_to_node_at_point(self.cursor, tree)?;
            path.nodes()
                .iter()
                .find(|node| node.style.hover.is_some())
                .map(|node| node.key.clone())
        });
        if hovered != self.hovered {
            log::debug!("hover moved to {hovered:?}");
            self.hovered = hovered;
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        self.runtime.frame_requester().request_frame();
    }

    /// A handler that consumed an event may have changed what the content
    /// builds, so the next frame relays out.
    fn schedule_if(&self, consumed: bool) -> bool {
        if consumed {
            self.request_frame();
        }
        consumed
    }
}

fn collect_focusable(node: &RenderNode, out: &mut Vec<ElementKey>) {
    if node.is_focusable() {
        out.push(node.key.clone());
    }
    for child in &node.children {
        collect_focusable(child, out);
    }
}
