//! Static text widget.

use super::{Widget, WidgetKind, WidgetState};
use crate::config::UiConfig;
use crate::error::UiResult;
use crate::render::{Surface, TextRasterizer};
use crate::style::Color;

/// A single line of display-only text.
///
/// Text is intrinsically sized: every change re-rasterizes immediately and
/// the widget takes the size of the rasterized line.
#[derive(Debug, Clone)]
pub struct Text {
    state: WidgetState,
    text: String,
    font_size: f32,
    font_color: Color,
    rasterizer: TextRasterizer,
    rendered: Surface,
}

impl Text {
    /// Font size used when none is given.
    pub const DEFAULT_FONT_SIZE: f32 = 10.0;

    /// Creates text with the default font size and color.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut this = Self {
            state: WidgetState::new((0.0, 0.0), (0.0, 0.0)),
            text: text.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_color: Color::TEXT,
            rasterizer: TextRasterizer::default(),
            rendered: Surface::default(),
        };
        this.render_text();
        this
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.set_font_size(font_size);
        self
    }

    /// Sets the font color.
    #[must_use]
    pub fn with_font_color(mut self, color: impl Into<Color>) -> Self {
        self.set_font_color(color.into());
        self
    }

    /// Returns the text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the font size.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the font color.
    #[must_use]
    pub fn font_color(&self) -> Color {
        self.font_color
    }

    /// Returns the rasterized line.
    #[must_use]
    pub fn rendered(&self) -> &Surface {
        &self.rendered
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.render_text();
    }

    /// Changes the font color.
    pub fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
        self.render_text();
    }

    /// Changes the font size.
    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
        self.render_text();
    }

    /// Changes the glyph metrics.
    pub fn set_rasterizer(&mut self, rasterizer: TextRasterizer) {
        self.rasterizer = rasterizer;
        self.render_text();
    }

    fn render_text(&mut self) {
        self.rendered = self
            .rasterizer
            .rasterize(&self.text, self.font_size, self.font_color);
        self.state.size = self.rendered.size();
    }
}

impl Widget for Text {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        target.blit(&self.rendered, (0.0, 0.0));
        Ok(())
    }

    fn configure(&mut self, config: &UiConfig) {
        self.set_rasterizer(config.font.rasterizer());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    #[test]
    fn test_text_is_intrinsically_sized() {
        let mut text = Text::new("wakanda");
        assert_eq!(text.state().size, (42.0, 12.0));

        text.set_text("LameUI");
        text.set_font_size(64.0);
        assert_eq!(text.state().size, (231.0, 77.0));
    }

    #[test]
    fn test_font_color_rerasterizes() {
        let mut text = Text::new("abc").with_font_color((255, 0, 0));
        text.set_font_color(Color::rgb(0, 255, 0));

        assert!(matches!(
            text.rendered().commands(),
            [RenderCommand::Text { color, .. }] if *color == Color::rgb(0, 255, 0)
        ));
    }

    #[test]
    fn test_redraw_blits_rendered_line() {
        let mut text = Text::new("hi").with_font_size(20.0);
        let mut surface = Surface::new(text.state().size);
        text.redraw(&mut surface).unwrap();

        assert_eq!(surface.commands().len(), 3);
    }

    #[test]
    fn test_configure_applies_font_metrics() {
        let mut config = UiConfig::default();
        config.font.glyph_advance = 1.0;
        config.font.line_height = 2.0;

        let mut text = Text::new("abcd");
        text.configure(&config);
        assert_eq!(text.state().size, (40.0, 20.0));
    }
}
