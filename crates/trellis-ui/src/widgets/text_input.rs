//! Editable text field.
//!
//! The field keeps its text, cursor and selection in the state cache, so
//! they survive the element being rebuilt every pass. Key events run
//! through the field's [`Keymap`] and [`ActionTable`]; the outcome is
//! written back to state, reported to `on_change` when the text changed,
//! and a redraw is requested. Focus is granted by the host, which writes
//! the [`FOCUSED_SLOT`] flag the field reads to decide whether to show its
//! caret.

#![allow(non_snake_case)]

use std::fmt;
use std::rc::Rc;

use trellis_core::collections::map::HashMap;
use trellis_core::{FrameRequester, StateSetter};
use trellis_foundation::{KeyEvent, PointerEventKind, UiEvent, FOCUSED_SLOT};
use trellis_ui_graphics::{Color, EdgeInsets, FontConfig, Point, Size};
use trellis_ui_layout::{Axis, Constraints, LayoutError, SelfLayout};

use crate::element::{content_space, require_bounded, AnyElement, Element, LayoutContext};
use crate::render_node::{EventHandler, NodeFlags, NodeKind, NodeStyle, RenderNode, StateStyle};
use crate::text::actions::INSERT_CHARACTER;
use crate::text::layout::stack_lines;
use crate::text::{ActionInput, ActionTable, Keymap, TextModel, TextPoint, TextSelection};
use crate::UiError;

/// State slot holding the field's text (`String`).
pub const TEXT_SLOT: &str = "text";
/// State slot holding the cursor (`TextPoint`).
pub const CURSOR_SLOT: &str = "cursor";
/// State slot holding the selection (`TextSelection`).
pub const SELECTION_SLOT: &str = "selection";

const CARET_WIDTH: f32 = 2.0;

/// Callback receiving the field's text after every edit that changed it.
#[derive(Clone)]
pub struct ChangeHandler(Rc<dyn Fn(&str)>);

impl ChangeHandler {
    pub fn new(handler: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, text: &str) {
        (self.0)(text)
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler(..)")
    }
}

#[derive(Clone, Debug)]
pub struct TextInputSpec {
    pub key: Option<String>,
    /// Text the field starts with. Later passes keep the edited text.
    pub value: String,
    pub min_width: f32,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
    pub keymap: Rc<Keymap>,
    pub actions: Rc<ActionTable>,
    pub on_change: Option<ChangeHandler>,
}

impl Default for TextInputSpec {
    fn default() -> Self {
        Self {
            key: None,
            value: String::new(),
            min_width: 0.0,
            margin: EdgeInsets::ZERO,
            border: EdgeInsets::uniform(1.0),
            padding: EdgeInsets::symmetric(4.0, 2.0),
            style: NodeStyle::default()
                .with_background(Color::WHITE)
                .with_border_color(Color::GRAY)
                .with_focus(StateStyle {
                    border_color: Some(Color::BLUE),
                    ..StateStyle::default()
                }),
            keymap: Rc::new(Keymap::standard()),
            actions: Rc::new(ActionTable::standard()),
            on_change: None,
        }
    }
}

impl TextInputSpec {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
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

    pub fn font(mut self, font: FontConfig) -> Self {
        self.style.font = font;
        self
    }

    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = Rc::new(keymap);
        self
    }

    pub fn actions(mut self, actions: ActionTable) -> Self {
        self.actions = Rc::new(actions);
        self
    }

    pub fn on_change(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.on_change = Some(ChangeHandler::new(handler));
        self
    }
}

/// Caret x offsets for every column of every line, relative to the content
/// origin. Offsets are summed glyph advances; each distinct glyph is
/// measured once per pass.
#[derive(Clone, Debug)]
struct CaretStops {
    line_height: f32,
    lines: Vec<Vec<f32>>,
}

impl CaretStops {
    fn measure(cx: &LayoutContext<'_>, lines: &[String], font: &FontConfig) -> Self {
        let line_height = cx.measure_text("", font).size.height;
        let mut advances: HashMap<char, f32> = HashMap::default();
        let mut glyph = [0u8; 4];
        let lines = lines
            .iter()
            .map(|line| {
                let mut stops = Vec::with_capacity(line.len() + 1);
                let mut x = 0.0;
                stops.push(x);
                for ch in line.chars() {
                    x += *advances.entry(ch).or_insert_with(|| {
                        cx.measure_text(ch.encode_utf8(&mut glyph), font).size.width
                    });
                    stops.push(x);
                }
                stops
            })
            .collect();
        Self { line_height, lines }
    }

    fn x(&self, point: TextPoint) -> f32 {
        self.lines
            .get(point.line)
            .and_then(|stops| stops.get(point.column))
            .copied()
            .unwrap_or(0.0)
    }

    fn line_top(&self, line: usize) -> f32 {
        line as f32 * self.line_height
    }

    /// The text position closest to `local` (content space).
    fn point_at(&self, local: Point) -> TextPoint {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return TextPoint::default();
        };
        let line = if self.line_height > 0.0 {
            ((local.y / self.line_height).floor().max(0.0) as usize).min(last)
        } else {
            0
        };
        let column = self.lines[line]
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - local.x).abs().total_cmp(&(*b - local.x).abs()))
            .map(|(column, _)| column)
            .unwrap_or(0);
        TextPoint::new(column, line)
    }
}

/// What the field's event handler holds on to between passes.
struct EditSession {
    text: StateSetter<String>,
    cursor: StateSetter<TextPoint>,
    selection: StateSetter<TextSelection>,
    initial: String,
    keymap: Rc<Keymap>,
    actions: Rc<ActionTable>,
    on_change: Option<ChangeHandler>,
    stops: CaretStops,
    content_origin: Point,
    frames: FrameRequester,
}

impl EditSession {
    fn handle(&self, event: &UiEvent) -> Result<bool, UiError> {
        match event {
            UiEvent::Pointer(pointer) if pointer.kind == PointerEventKind::Down => {
                let point = self.stops.point_at(pointer.position - self.content_origin);
                self.cursor.set(point);
                self.selection.set(TextSelection::inactive());
                self.frames.request_frame();
                Ok(true)
            }
            UiEvent::Key(key) => self.apply_key(key),
            UiEvent::Focus(_) => {
                self.frames.request_frame();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn apply_key(&self, key: &KeyEvent) -> Result<bool, UiError> {
        let text = self.text.get().unwrap_or_else(|| self.initial.clone());
        let cursor = self.cursor.get().unwrap_or_default();
        let selection = self.selection.get().unwrap_or_default();
        let action = self.keymap.resolve(key);
        let outcome = self.actions.apply(
            action,
            &ActionInput {
                text: &text,
                cursor,
                selection,
                key,
            },
        )?;
        log::trace!("{action} moved the cursor from {cursor} to {}", outcome.cursor);

        let changed = outcome.text != text;
        if changed {
            self.text.set(outcome.text.clone());
            if let Some(on_change) = &self.on_change {
                on_change.call(&outcome.text);
            }
        }
        self.cursor.set(outcome.cursor);
        self.selection.set(outcome.selection);
        self.frames.request_frame();
        // Unbound keys that inserted nothing are left for ancestors.
        Ok(changed || action != INSERT_CHARACTER)
    }
}

pub struct TextInputElement {
    spec: TextInputSpec,
}

impl TextInputElement {
    pub fn new(spec: TextInputSpec) -> Self {
        Self { spec }
    }

    fn selection_nodes(
        key: &trellis_core::ElementKey,
        model: &TextModel,
        selection: &TextSelection,
        stops: &CaretStops,
        origin: Point,
    ) -> Vec<RenderNode> {
        (0..model.line_count())
            .filter_map(|line| {
                let (from, to) = selection.columns_on_line(line, model.line_len(line))?;
                let left = stops.x(TextPoint::new(from, line));
                let right = stops.x(TextPoint::new(to, line));
                let node = RenderNode::builder(key.clone(), NodeKind::Selection)
                    .size(Size::new((right - left).max(0.0), stops.line_height))
                    .style(NodeStyle::default().with_background(Color::SELECTION))
                    .flags(NodeFlags::SHADOW)
                    .build()
                    .placed_at(Point::new(origin.x + left, origin.y + stops.line_top(line)));
                Some(node)
            })
            .collect()
    }
}

impl Element for TextInputElement {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(self.spec.key.as_deref(), |cx, key| {
            let state = cx.state().clone();
            let (text, text_slot) = state.use_state(TEXT_SLOT, || self.spec.value.clone());
            let (cursor, cursor_slot) = state.use_state(CURSOR_SLOT, TextPoint::default);
            let (selection, selection_slot) =
                state.use_state(SELECTION_SLOT, TextSelection::inactive);
            let (focused, _) = state.use_state(FOCUSED_SLOT, || false);

            let grows = constraints.mode(Axis::Horizontal) == SelfLayout::Grow;
            require_bounded(key, &constraints, Axis::Horizontal, grows)?;

            let style = &self.spec.style;
            let insets = self.spec.margin + self.spec.border + self.spec.padding;
            let content = content_space(key, &constraints, insets);
            let origin = insets.top_left();
            let model = TextModel::from_text(&text);
            let cursor = model.clamp(cursor);
            let stops = CaretStops::measure(cx, model.lines(), &style.font);

            let (line_nodes, extent) = stack_lines(cx, key, model.lines(), style, origin);
            let mut children = Self::selection_nodes(key, &model, &selection, &stops, origin);
            children.extend(line_nodes);
            if focused {
                let caret_color = style.resolve(false, true).text_color;
                children.push(
                    RenderNode::builder(key.clone(), NodeKind::Caret)
                        .size(Size::new(CARET_WIDTH, stops.line_height))
                        .style(NodeStyle::default().with_background(caret_color))
                        .flags(NodeFlags::SHADOW)
                        .build()
                        .placed_at(Point::new(
                            origin.x + stops.x(cursor),
                            origin.y + stops.line_top(cursor.line),
                        )),
                );
            }

            let width = if grows {
                content.width
            } else {
                (extent.width + CARET_WIDTH).max(self.spec.min_width)
            };
            let size = Size::new(width, extent.height).outset(insets);
            let baseline = origin.y + cx.measure_text("", &style.font).baseline;

            let session = EditSession {
                text: text_slot,
                cursor: cursor_slot,
                selection: selection_slot,
                initial: self.spec.value.clone(),
                keymap: Rc::clone(&self.spec.keymap),
                actions: Rc::clone(&self.spec.actions),
                on_change: self.spec.on_change.clone(),
                stops,
                content_origin: origin,
                frames: cx.frame_requester(),
            };

            Ok(RenderNode::builder(key.clone(), NodeKind::TextInput)
                .size(size)
                .baseline(baseline)
                .insets(self.spec.margin, self.spec.border, self.spec.padding)
                .style(style.clone())
                .children(children)
                .handler(Some(EventHandler::new(move |event| session.handle(event))))
                .flags(NodeFlags::FOCUSABLE | NodeFlags::CLIP)
                .build())
        })
    }
}

pub fn TextInput(spec: TextInputSpec) -> AnyElement {
    Box::new(TextInputElement::new(spec))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use trellis_core::{KeyVendor, StateCache};
    use trellis_render_common::{MonospaceMetrics, TextMeasurer, TextMetrics};

    fn stops() -> CaretStops {
        CaretStops {
            line_height: 20.0,
            lines: vec![vec![0.0, 10.0, 20.0], vec![0.0, 10.0]],
        }
    }

    #[test]
    fn caret_lands_on_nearest_column() {
        let stops = stops();
        assert_eq!(stops.point_at(Point::new(14.0, 5.0)), TextPoint::new(1, 0));
        assert_eq!(stops.point_at(Point::new(16.0, 5.0)), TextPoint::new(2, 0));
        assert_eq!(stops.point_at(Point::new(-3.0, 25.0)), TextPoint::new(0, 1));
    }

    struct CountingMetrics {
        inner: MonospaceMetrics,
        calls: Cell<usize>,
    }

    impl TextMeasurer for CountingMetrics {
        fn measure_text(&self, text: &str, font: &FontConfig) -> TextMetrics {
            self.calls.set(self.calls.get() + 1);
            self.inner.measure_text(text, font)
        }
    }

    #[test]
    fn caret_stops_measure_each_glyph_once() {
        let metrics = CountingMetrics {
            inner: MonospaceMetrics::default(),
            calls: Cell::new(0),
        };
        let mut keys = KeyVendor::new();
        let state = StateCache::new();
        let cx = LayoutContext::new(&mut keys, &state, &metrics, FrameRequester::detached());
        let lines = vec!["a".repeat(200), "ab".to_owned(), String::new()];

        let stops = CaretStops::measure(&cx, &lines, &FontConfig::default());

        assert_eq!(stops.lines[0].len(), 201);
        assert_eq!(stops.x(TextPoint::new(200, 0)), 1600.0);
        assert_eq!(stops.x(TextPoint::new(2, 1)), 16.0);
        assert_eq!(stops.lines[2], vec![0.0]);
        // The line height, then `a` and `b`.
        assert_eq!(metrics.calls.get(), 3);
    }

    #[test]
    fn clicks_below_the_text_pick_the_last_line() {
        let stops = stops();
        assert_eq!(stops.point_at(Point::new(100.0, 300.0)), TextPoint::new(1, 1));
        assert_eq!(stops.x(TextPoint::new(5, 9)), 0.0);
    }
}
