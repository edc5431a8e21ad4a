//! Colors for widget backgrounds, text and highlights.
//!
//! Channels are 8-bit, matching what a raster backend consumes directly.
//! The only styling the toolkit knows about is per-widget color; there is
//! no theme layer.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent. Default widget background.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Solid red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Solid blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Default font color.
    pub const TEXT: Self = Self::rgb(240, 240, 240);

    /// Channel boost applied to a background to derive its highlight.
    pub const HIGHLIGHT_DELTA: u8 = 80;

    /// Creates a color from RGBA channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns the color with every channel (alpha included) raised by
    /// `delta`, saturating at 255.
    #[must_use]
    pub const fn highlighted(self, delta: u8) -> Self {
        Self::rgba(
            self.r.saturating_add(delta),
            self.g.saturating_add(delta),
            self.b.saturating_add(delta),
            self.a.saturating_add(delta),
        )
    }

    /// Returns true if the color contributes nothing when composited.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Converts to normalized `[r, g, b, a]` for vertex upload.
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}
