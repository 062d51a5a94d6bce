//! Text measurement and line layout.

use trellis_foundation::UiEvent;
use trellis_render_common::TextMeasurer;
use trellis_ui_graphics::{Color, EdgeInsets, FontConfig, Point, Size};
use trellis_ui_layout::{Constraints, LayoutError};

use crate::element::{content_space, Element, LayoutContext};
use crate::render_node::{EventHandler, NodeFlags, NodeKind, NodeStyle, RenderNode, StateStyle};
use crate::UiError;

/// How text is broken into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextMode {
    /// One run, newlines included verbatim.
    #[default]
    SingleLine,
    /// One line per `\n`-separated segment.
    MultiLine,
    /// Greedy word wrap within the available width; `\n` starts a new
    /// paragraph.
    Wrap,
}

#[derive(Clone, Debug, Default)]
pub struct TextSpec {
    pub key: Option<String>,
    pub mode: TextMode,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
    pub on_event: Option<EventHandler>,
}

impl TextSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn wrap(self) -> Self {
        self.mode(TextMode::Wrap)
    }

    pub fn multi_line(self) -> Self {
        self.mode(TextMode::MultiLine)
    }

    pub fn font(mut self, font: FontConfig) -> Self {
        self.style.font = font;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.text_color = color;
        self
    }

    pub fn hover_color(mut self, color: Color) -> Self {
        let hover = self.style.hover.get_or_insert_with(StateStyle::default);
        hover.text_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = Some(color);
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: EdgeInsets) -> Self {
        self.margin = margin;
        self
    }

    pub fn on_event(
        mut self,
        handler: impl Fn(&UiEvent) -> Result<bool, UiError> + 'static,
    ) -> Self {
        self.on_event = Some(EventHandler::new(handler));
        self
    }
}

/// Breaks `text` into lines no wider than `width`.
///
/// Each word is appended together with one trailing space unless that would
/// make the line wider than `width`, in which case it opens the next line.
/// A word that is wider than `width` on its own still gets a line to itself.
/// Returned lines carry no trailing space.
pub fn wrap_lines(
    text: &str,
    width: f32,
    font: &FontConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = format!("{current}{word} ");
            if current.is_empty() || measurer.measure_text(&candidate, font).size.width <= width {
                current = candidate;
            } else {
                lines.push(current.trim_end().to_owned());
                current = format!("{word} ");
            }
        }
        lines.push(current.trim_end().to_owned());
    }
    lines
}

/// Splits `text` into the lines `mode` calls for, given the content width.
pub fn break_lines(
    text: &str,
    mode: TextMode,
    width: f32,
    font: &FontConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    match mode {
        TextMode::SingleLine => vec![text.to_owned()],
        TextMode::MultiLine => text.split('\n').map(str::to_owned).collect(),
        TextMode::Wrap if width.is_finite() => wrap_lines(text, width, font, measurer),
        TextMode::Wrap => {
            log::debug!("wrapping text without a width bound; laying it out as multi-line");
            text.split('\n').map(str::to_owned).collect()
        }
    }
}

/// Lays `lines` out top to bottom starting at `origin`, one shadow node per
/// line. Returns the line nodes and the union of their sizes.
pub fn stack_lines(
    cx: &LayoutContext<'_>,
    key: &trellis_core::ElementKey,
    lines: &[String],
    style: &NodeStyle,
    origin: Point,
) -> (Vec<RenderNode>, Size) {
    let mut nodes = Vec::with_capacity(lines.len());
    let mut extent = Size::ZERO;
    for line in lines {
        let metrics = cx.measure_text(line, &style.font);
        let node = RenderNode::builder(key.clone(), NodeKind::TextLine)
            .size(metrics.size)
            .baseline(metrics.baseline)
            .style(style.clone())
            .text(line.as_str(), style.font.clone())
            .flags(NodeFlags::SHADOW)
            .build()
            .placed_at(Point::new(origin.x, origin.y + extent.height));
        extent.width = extent.width.max(metrics.size.width);
        extent.height += metrics.size.height;
        nodes.push(node);
    }
    (nodes, extent)
}

/// A run of text.
pub struct TextElement {
    value: String,
    spec: TextSpec,
}

impl TextElement {
    pub fn new(value: impl Into<String>, spec: TextSpec) -> Self {
        Self {
            value: value.into(),
            spec,
        }
    }
}

impl Element for TextElement {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(self.spec.key.as_deref(), |cx, key| {
            let insets = self.spec.margin + self.spec.border + self.spec.padding;
            let content = content_space(key, &constraints, insets);
            let lines = break_lines(
                &self.value,
                self.spec.mode,
                content.width,
                &self.spec.style.font,
                cx.measurer(),
            );
            let origin = insets.top_left();
            let (line_nodes, extent) = stack_lines(cx, key, &lines, &self.spec.style, origin);
            let baseline = line_nodes
                .first()
                .map(|line| line.position.y + line.baseline)
                .unwrap_or(origin.y);

            Ok(RenderNode::builder(key.clone(), NodeKind::Text)
                .size(extent.outset(insets))
                .baseline(baseline)
                .insets(self.spec.margin, self.spec.border, self.spec.padding)
                .style(self.spec.style.clone())
                .children(line_nodes)
                .handler(self.spec.on_event.clone())
                .build())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trellis_render_common::MonospaceMetrics;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::new(10.0, 20.0)
    }

    #[test]
    fn wraps_greedily_with_trailing_space() {
        // "aa bb " is 60 wide: fits exactly.
        let lines = wrap_lines("aa bb cc", 60.0, &FontConfig::default(), &metrics());
        assert_eq!(lines, vec!["aa bb", "cc"]);
    }

    #[test]
    fn long_word_sits_alone_untruncated() {
        let lines = wrap_lines("a enormous b", 40.0, &FontConfig::default(), &metrics());
        assert_eq!(lines, vec!["a", "enormous", "b"]);
    }

    #[test]
    fn newline_starts_a_paragraph() {
        let lines = wrap_lines("ab\ncd ef", 1000.0, &FontConfig::default(), &metrics());
        assert_eq!(lines, vec!["ab", "cd ef"]);
    }

    #[test]
    fn unbounded_wrap_degrades_to_multi_line() {
        let lines = break_lines(
            "one two\nthree",
            TextMode::Wrap,
            f32::INFINITY,
            &FontConfig::default(),
            &metrics(),
        );
        assert_eq!(lines, vec!["one two", "three"]);
    }

    proptest! {
        #[test]
        fn wrapped_lines_fit_when_words_fit(
            words in prop::collection::vec("[a-z]{1,6}", 1..20),
            width_chars in 6usize..30,
        ) {
            let measurer = metrics();
            let width = width_chars as f32 * measurer.char_width;
            let text = words.join(" ");
            let font = FontConfig::default();
            for line in wrap_lines(&text, width, &font, &measurer) {
                prop_assert!(measurer.measure_text(&line, &font).size.width <= width);
            }
        }
    }
}
