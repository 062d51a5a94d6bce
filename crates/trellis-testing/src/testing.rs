use trellis_app_shell::{AppShell, ShellConfig};
use trellis_core::{ElementKey, StateCache};
use trellis_foundation::KeyEvent;
use trellis_render_common::{MonospaceMetrics, RecordingSurface};
use trellis_ui::{
    find_path_to_node_at_point, find_path_to_node_by_key, AnyElement, RenderNode, UiError,
};
use trellis_ui_graphics::{Point, Rect, Size};

/// Upper bound on frames run by [`LayoutTestRule::pump_until_idle`]. Content
/// that keeps requesting frames past this is reported instead of hanging the
/// test.
const MAX_PUMP_FRAMES: usize = 64;

/// Headless harness for exercising element trees in tests.
///
/// `LayoutTestRule` owns an [`AppShell`] painting into a
/// [`RecordingSurface`] with deterministic monospace metrics. It drives input
/// the way a host window would and runs frames until no redraw is pending,
/// so assertions always see the settled tree.
pub struct LayoutTestRule {
    viewport: Size,
    metrics: MonospaceMetrics,
    shell: Option<AppShell<RecordingSurface>>,
}

impl LayoutTestRule {
    /// A rule with an 800x600 viewport and 8x20 monospace metrics.
    pub fn new() -> Self {
        Self {
            viewport: ShellConfig::default().viewport,
            metrics: MonospaceMetrics::default(),
            shell: None,
        }
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Installs `content` and runs frames until idle.
    pub fn set_content(
        &mut self,
        content: impl Fn() -> AnyElement + 'static,
    ) -> Result<(), UiError> {
        let config = ShellConfig {
            viewport: self.viewport,
            background: None,
            log_render_tree: true,
        };
        let surface = RecordingSurface::new(self.metrics);
        self.shell = Some(AppShell::with_config(surface, config, content));
        self.relayout()
    }

    pub fn has_content(&self) -> bool {
        self.shell.is_some()
    }

    /// Forces a layout pass and repaint, then settles.
    pub fn relayout(&mut self) -> Result<(), UiError> {
        if let Some(shell) = self.shell.as_mut() {
            shell.layout()?;
            shell.redraw();
        }
        self.pump_until_idle()
    }

    /// Runs frames while redraws are requested.
    pub fn pump_until_idle(&mut self) -> Result<(), UiError> {
        let Some(shell) = self.shell.as_mut() else {
            return Ok(());
        };
        for _ in 0..MAX_PUMP_FRAMES {
            if !shell.should_render() {
                return Ok(());
            }
            shell.layout()?;
            shell.redraw();
        }
        log::warn!("content still requesting frames after {MAX_PUMP_FRAMES} frames");
        Ok(())
    }

    /// Resizes the viewport and settles.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), UiError> {
        self.viewport = Size::new(width, height);
        if let Some(shell) = self.shell.as_mut() {
            shell.set_viewport(width, height);
        }
        self.relayout()
    }

    pub fn root(&self) -> Option<&RenderNode> {
        self.shell.as_ref()?.tree()
    }

    /// The node with identity `key`, e.g. `"1.2"` or `"#form.1"`.
    pub fn node(&self, key: &str) -> Option<&RenderNode> {
        let root = self.root()?;
        find_path_to_node_by_key(&ElementKey::new(key), root).map(|path| path.target())
    }

    /// Root-space bounds of the node with identity `key`.
    pub fn bounds_of(&self, key: &str) -> Option<Rect> {
        let root = self.root()?;
        find_path_to_node_by_key(&ElementKey::new(key), root).map(|path| path.target_bounds())
    }

    pub fn center_of(&self, key: &str) -> Option<Point> {
        self.bounds_of(key).map(|bounds| bounds.center())
    }

    /// The deepest hit-testable node under a root-space point.
    pub fn node_at(&self, x: f32, y: f32) -> Option<&RenderNode> {
        let root = self.root()?;
        find_path_to_node_at_point(Point::new(x, y), root).map(|path| path.target())
    }

    /// Moves the pointer to `(x, y)` and clicks. Returns whether the press
    /// was consumed.
    pub fn tap(&mut self, x: f32, y: f32) -> Result<bool, UiError> {
        let Some(shell) = self.shell.as_mut() else {
            return Ok(false);
        };
        shell.pointer_moved(x, y)?;
        let consumed = shell.pointer_pressed()?;
        shell.pointer_released()?;
        self.pump_until_idle()?;
        Ok(consumed)
    }

    /// Clicks the centre of the node with identity `key`.
    pub fn tap_key(&mut self, key: &str) -> Result<bool, UiError> {
        match self.center_of(key) {
            Some(center) => self.tap(center.x, center.y),
            None => {
                log::warn!("no node with key {key} to tap");
                Ok(false)
            }
        }
    }

    pub fn hover(&mut self, x: f32, y: f32) -> Result<bool, UiError> {
        let Some(shell) = self.shell.as_mut() else {
            return Ok(false);
        };
        let consumed = shell.pointer_moved(x, y)?;
        self.pump_until_idle()?;
        Ok(consumed)
    }

    /// Sends a key press to the focused element and settles.
    pub fn press_key(&mut self, event: KeyEvent) -> Result<bool, UiError> {
        let Some(shell) = self.shell.as_mut() else {
            return Ok(false);
        };
        let consumed = shell.key_pressed(event)?;
        self.pump_until_idle()?;
        Ok(consumed)
    }

    /// Types `text` one key at a time. `'\n'` is sent as `Enter` and `'\t'`
    /// as `Tab`.
    pub fn type_text(&mut self, text: &str) -> Result<(), UiError> {
        for ch in text.chars() {
            let key = match ch {
                '\n' => "Enter".to_owned(),
                '\t' => "Tab".to_owned(),
                other => other.to_string(),
            };
            self.press_key(KeyEvent::new(key))?;
        }
        Ok(())
    }

    /// Wheels at `(x, y)` by `(dx, dy)`.
    pub fn scroll(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> Result<bool, UiError> {
        let Some(shell) = self.shell.as_mut() else {
            return Ok(false);
        };
        shell.pointer_moved(x, y)?;
        let consumed = shell.wheel(dx, dy)?;
        self.pump_until_idle()?;
        Ok(consumed)
    }

    pub fn focused(&self) -> Option<&ElementKey> {
        self.shell.as_ref()?.focused()
    }

    pub fn state(&self) -> Option<&StateCache> {
        self.shell.as_ref().map(|shell| shell.state())
    }

    pub fn surface(&self) -> Option<&RecordingSurface> {
        self.shell.as_ref().map(|shell| shell.surface())
    }

    pub fn shell(&self) -> Option<&AppShell<RecordingSurface>> {
        self.shell.as_ref()
    }

    pub fn shell_mut(&mut self) -> Option<&mut AppShell<RecordingSurface>> {
        self.shell.as_mut()
    }
}

impl Default for LayoutTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `LayoutTestRule`.
pub fn run_test_shell<R>(f: impl FnOnce(&mut LayoutTestRule) -> R) -> R {
    let mut rule = LayoutTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use trellis_ui::{BoxSpec, Square, VBox};
    use trellis_ui_graphics::Color;

    #[test]
    fn rule_reports_content_and_root() {
        run_test_shell(|rule| {
            assert!(!rule.has_content());
            assert!(rule.root().is_none());

            let passes = Rc::new(Cell::new(0));
            let counter = Rc::clone(&passes);
            rule.set_content(move || {
                counter.set(counter.get() + 1);
                VBox(
                    BoxSpec::new(),
                    vec![Square(10.0, Color::BLACK), Square(20.0, Color::BLACK)],
                )
            })
            .unwrap();

            assert!(rule.has_content());
            assert_eq!(rule.root().unwrap().key.as_str(), "1");
            assert_eq!(rule.node("1.2").unwrap().size, Size::new(20.0, 20.0));
            assert_eq!(
                rule.bounds_of("1.2"),
                Some(Rect::new(0.0, 10.0, 20.0, 20.0))
            );
            assert_eq!(rule.node_at(5.0, 15.0).unwrap().key.as_str(), "1.2");

            let before = passes.get();
            rule.relayout().unwrap();
            assert_eq!(passes.get(), before + 1);
        });
    }

    #[test]
    fn tapping_without_content_is_a_no_op() {
        let mut rule = LayoutTestRule::new();
        assert!(!rule.tap(1.0, 1.0).unwrap());
        assert!(!rule.tap_key("1").unwrap());
        assert!(rule.focused().is_none());
    }
}
