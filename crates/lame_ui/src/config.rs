//! Toolkit configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or [`UiConfig::default`]) is a complete configuration:
//!
//! ```toml
//! highlight_delta = 80
//!
//! [root]
//! width = 1024.0
//! height = 768.0
//! background = { r = 22, g = 22, b = 22, a = 255 }
//!
//! [text_input]
//! caret_blink_period = 0.5
//! key_repeat_delay = 0.5
//! key_repeat_interval = 0.033
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};
use crate::render::TextRasterizer;
use crate::style::Color;

/// Root container options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    /// Root width in pixels.
    pub width: f32,
    /// Root height in pixels.
    pub height: f32,
    /// Root background.
    pub background: Color,
    /// Debug name of the root container.
    pub name: String,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            background: Color::rgb(22, 22, 22),
            name: "root".to_owned(),
        }
    }
}

/// Text field timings and geometry. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInputConfig {
    /// Time between caret visibility flips.
    pub caret_blink_period: f32,
    /// Hold time before backspace starts repeating.
    pub key_repeat_delay: f32,
    /// Time between repeated deletes once repeating.
    pub key_repeat_interval: f32,
    /// Horizontal padding between the field edge and the text.
    pub padding: f32,
    /// Caret width in pixels.
    pub caret_width: f32,
}

impl Default for TextInputConfig {
    fn default() -> Self {
        Self {
            caret_blink_period: 0.5,
            key_repeat_delay: 0.5,
            key_repeat_interval: 0.033,
            padding: 8.0,
            caret_width: 2.0,
        }
    }
}

/// Glyph metrics, as fractions of the font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Horizontal advance per glyph.
    pub glyph_advance: f32,
    /// Line height.
    pub line_height: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        let metrics = TextRasterizer::MONOSPACE;
        Self {
            glyph_advance: metrics.glyph_advance,
            line_height: metrics.line_height,
        }
    }
}

impl FontConfig {
    /// Returns a rasterizer using these metrics.
    #[must_use]
    pub const fn rasterizer(&self) -> TextRasterizer {
        TextRasterizer {
            glyph_advance: self.glyph_advance,
            line_height: self.line_height,
        }
    }
}

/// Complete toolkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Channel boost used to derive hover highlights.
    pub highlight_delta: u8,
    /// Root container.
    pub root: RootConfig,
    /// Text fields.
    pub text_input: TextInputConfig,
    /// Text metrics.
    pub font: FontConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            highlight_delta: Color::HIGHLIGHT_DELTA,
            root: RootConfig::default(),
            text_input: TextInputConfig::default(),
            font: FontConfig::default(),
        }
    }
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigParse`] for malformed TOML and
    /// [`UiError::Config`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] naming the first offending field.
    pub fn validate(&self) -> UiResult<()> {
        let positive = [
            ("root.width", self.root.width),
            ("root.height", self.root.height),
            ("text_input.caret_blink_period", self.text_input.caret_blink_period),
            ("text_input.key_repeat_interval", self.text_input.key_repeat_interval),
            ("font.glyph_advance", self.font.glyph_advance),
            ("font.line_height", self.font.line_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(UiError::Config(format!("{field} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("text_input.key_repeat_delay", self.text_input.key_repeat_delay),
            ("text_input.padding", self.text_input.padding),
            ("text_input.caret_width", self.text_input.caret_width),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(UiError::Config(format!("{field} must not be negative, got {value}")));
            }
        }

        Ok(())
    }

    /// Returns the root size.
    #[must_use]
    pub fn root_size(&self) -> (f32, f32) {
        (self.root.width, self.root.height)
    }
}
