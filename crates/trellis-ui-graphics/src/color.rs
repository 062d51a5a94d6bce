/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
    pub const LIGHT_GRAY: Color = Color(0.85, 0.85, 0.85, 1.0);
    pub const GRAY: Color = Color(0.5, 0.5, 0.5, 1.0);
    pub const BLUE: Color = Color(0.2, 0.4, 0.9, 1.0);
    pub const SELECTION: Color = Color(0.6, 0.75, 1.0, 0.6);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color(r, g, b, a)
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color(r, g, b, 1.0)
    }

    /// Builds a color from 8-bit sRGB channels.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Color(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Color(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }

    pub fn alpha(&self) -> f32 {
        self.3
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
