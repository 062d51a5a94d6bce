//! Common rendering contracts shared between renderer backends.
//!
//! Layout needs text measurement before anything is painted, so measurement
//! is its own trait ([`TextMeasurer`]) that every [`Surface`] also
//! implements. Concrete backends live outside this workspace;
//! [`RecordingSurface`] is the headless implementation used by tests and
//! tooling.

mod recording;

pub use recording::{DrawOp, MonospaceMetrics, RecordingSurface};

use trellis_ui_graphics::{Color, FontConfig, Point, Rect, Size};

/// Result of measuring a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width and line height of the run.
    pub size: Size,
    /// Distance from the top of the line box to the baseline.
    pub baseline: f32,
}

/// Measures text for layout.
pub trait TextMeasurer {
    /// Measures `text` in `font`. An empty string still reports the line
    /// height of the font.
    fn measure_text(&self, text: &str, font: &FontConfig) -> TextMetrics;
}

/// A 2D drawing surface with a transform/clip stack.
pub trait Surface: TextMeasurer {
    /// Called once before a frame is painted. Surfaces that accumulate
    /// output discard the previous frame here.
    fn begin_frame(&mut self) {}
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Intersects the current clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_bounds(&mut self, rect: Rect, color: Color, width: f32);
    /// Draws `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &FontConfig, color: Color);
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_text(&self, text: &str, font: &FontConfig) -> TextMetrics {
        (**self).measure_text(text, font)
    }
}
