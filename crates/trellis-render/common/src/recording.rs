use trellis_ui_graphics::{Color, FontConfig, Point, Rect};

use crate::{Surface, TextMeasurer, TextMetrics};

/// Fixed-advance text metrics: every character is `char_width` wide and
/// every line `line_height` tall, whatever the font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub baseline: f32,
}

impl MonospaceMetrics {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
            baseline: line_height * 0.75,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8.0, 20.0)
    }
}

impl TextMeasurer for MonospaceMetrics {
    fn measure_text(&self, text: &str, _font: &FontConfig) -> TextMetrics {
        TextMetrics {
            size: trellis_ui_graphics::Size::new(
                text.chars().count() as f32 * self.char_width,
                self.line_height,
            ),
            baseline: self.baseline,
        }
    }
}

/// A paint operation captured by [`RecordingSurface`], in surface
/// coordinates (all transforms applied).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Text {
        value: String,
        origin: Point,
        color: Color,
        font_size: f32,
    },
    Clip {
        rect: Rect,
    },
}

#[derive(Clone, Copy, Debug)]
struct Transform {
    offset: Point,
    scale: (f32, f32),
    clip: Option<Rect>,
}

impl Transform {
    fn identity() -> Self {
        Self {
            offset: Point::ZERO,
            scale: (1.0, 1.0),
            clip: None,
        }
    }

    fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.offset.x + point.x * self.scale.0,
            self.offset.y + point.y * self.scale.1,
        )
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        let origin = self.map_point(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.scale.0,
            rect.height * self.scale.1,
        )
    }
}

/// Headless surface that records draw operations instead of rasterising.
///
/// Operations fully outside the current clip are dropped, so tests can
/// assert on what would actually be visible.
#[derive(Debug)]
pub struct RecordingSurface {
    metrics: MonospaceMetrics,
    current: Transform,
    stack: Vec<Transform>,
    operations: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(metrics: MonospaceMetrics) -> Self {
        Self {
            metrics,
            current: Transform::identity(),
            stack: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Returns a slice of recorded operations in submission order.
    pub fn operations(&self) -> &[DrawOp] {
        &self.operations
    }

    /// Consumes the surface and yields the owned operations.
    pub fn into_operations(self) -> Vec<DrawOp> {
        self.operations
    }

    /// Drops recorded operations and resets the transform stack.
    pub fn clear(&mut self) {
        self.operations.clear();
        self.stack.clear();
        self.current = Transform::identity();
    }

    /// Text runs drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(|op| match op {
            DrawOp::Text { value, .. } => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn metrics(&self) -> MonospaceMetrics {
        self.metrics
    }

    fn visible(&self, rect: Rect) -> bool {
        match self.current.clip {
            Some(clip) => clip.intersect(rect).is_some(),
            None => true,
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(MonospaceMetrics::default())
    }
}

impl TextMeasurer for RecordingSurface {
    fn measure_text(&self, text: &str, font: &FontConfig) -> TextMetrics {
        self.metrics.measure_text(text, font)
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(previous) => self.current = previous,
            None => log::warn!("RecordingSurface::restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.current.offset = self.current.map_point(Point::new(dx, dy));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.current.scale = (self.current.scale.0 * sx, self.current.scale.1 * sy);
    }

    fn clip_rect(&mut self, rect: Rect) {
        let mapped = self.current.map_rect(rect);
        let clip = match self.current.clip {
            Some(existing) => existing
                .intersect(mapped)
                .unwrap_or(Rect::new(mapped.x, mapped.y, 0.0, 0.0)),
            None => mapped,
        };
        self.current.clip = Some(clip);
        self.operations.push(DrawOp::Clip { rect: clip });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.current.map_rect(rect);
        if self.visible(rect) {
            self.operations.push(DrawOp::FillRect { rect, color });
        }
    }

    fn stroke_bounds(&mut self, rect: Rect, color: Color, width: f32) {
        let rect = self.current.map_rect(rect);
        if self.visible(rect) {
            self.operations.push(DrawOp::StrokeRect { rect, color, width });
        }
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontConfig, color: Color) {
        let metrics = self.metrics.measure_text(text, font);
        let top_left = Point::new(origin.x, origin.y - metrics.baseline);
        let bounds = self.current.map_rect(Rect::from_origin_size(top_left, metrics.size));
        if self.visible(bounds) {
            self.operations.push(DrawOp::Text {
                value: text.to_owned(),
                origin: self.current.map_point(origin),
                color,
                font_size: font.size,
            });
        }
    }
}
