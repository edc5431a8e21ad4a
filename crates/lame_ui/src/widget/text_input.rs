//! Single-line editable text field.

use super::{PressResponse, Text, TextEditable, Widget, WidgetKind, WidgetState};
use crate::config::{TextInputConfig, UiConfig};
use crate::error::UiResult;
use crate::input::{Key, MouseButton};
use crate::layout::Rect;
use crate::render::Surface;
use crate::style::Color;

/// Caret visibility toggling at a fixed period while editing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CaretBlink {
    period: f32,
    elapsed: f32,
    visible: bool,
    running: bool,
}

impl CaretBlink {
    const fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            visible: false,
            running: false,
        }
    }

    fn start(&mut self) {
        self.running = true;
        self.restart_visible();
    }

    fn stop(&mut self) {
        self.running = false;
        self.visible = false;
        self.elapsed = 0.0;
    }

    /// Shows the caret and restarts the period, so it stays put while typing.
    fn restart_visible(&mut self) {
        self.visible = true;
        self.elapsed = 0.0;
    }

    fn advance(&mut self, dt: f32) {
        if !self.running || self.period <= 0.0 {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.visible = !self.visible;
        }
    }
}

/// Held-key repeat: one initial delay, then a steady interval.
#[derive(Debug, Clone, Copy, PartialEq)]
struct KeyRepeat {
    delay: f32,
    interval: f32,
    elapsed: f32,
    fired: u32,
    active: bool,
}

impl KeyRepeat {
    const fn new(delay: f32, interval: f32) -> Self {
        Self {
            delay,
            interval,
            elapsed: 0.0,
            fired: 0,
            active: false,
        }
    }

    fn start(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
        self.fired = 0;
    }

    fn stop(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.fired = 0;
    }

    /// Returns how many repeats fall inside the next `dt` seconds.
    fn advance(&mut self, dt: f32) -> u32 {
        if !self.active || self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;

        let mut count = 0;
        loop {
            let threshold = if self.fired == 0 { self.delay } else { self.interval };
            if self.elapsed < threshold {
                break;
            }
            self.elapsed -= threshold;
            self.fired += 1;
            count += 1;
        }
        count
    }
}

/// Editable single-line text field.
///
/// Editing is on exactly while the field is the root's selection. Text is
/// appended at the end and deleted from the end; when it outgrows the field
/// it scrolls left so the caret stays at the trailing edge.
#[derive(Debug, Clone)]
pub struct TextInput {
    state: WidgetState,
    text: String,
    display: Text,
    editing: bool,
    corner_radius: f32,
    timing: TextInputConfig,
    caret: CaretBlink,
    repeat: KeyRepeat,
}

impl TextInput {
    /// Font size used when none is given.
    pub const DEFAULT_FONT_SIZE: f32 = 20.0;

    /// Creates an empty field.
    #[must_use]
    pub fn new(size: (f32, f32), position: (f32, f32)) -> Self {
        let timing = TextInputConfig::default();
        Self {
            state: WidgetState::new(size, position),
            text: String::new(),
            display: Text::new("").with_font_size(Self::DEFAULT_FONT_SIZE),
            editing: false,
            corner_radius: 0.0,
            timing,
            caret: CaretBlink::new(timing.caret_blink_period),
            repeat: KeyRepeat::new(timing.key_repeat_delay, timing.key_repeat_interval),
        }
    }

    /// Sets the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.display.set_font_size(font_size);
        self
    }

    /// Sets the font (and caret) color.
    #[must_use]
    pub fn with_font_color(mut self, color: impl Into<Color>) -> Self {
        self.display.set_font_color(color.into());
        self
    }

    /// Rounds the corners.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Returns the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.sync_display();
    }

    /// Returns true while the field holds focus.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Returns true if the caret is drawn this frame.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.editing && self.caret.visible
    }

    /// Returns true while backspace is held and repeating.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeat.active
    }

    /// Applies blink and repeat timings.
    pub fn set_timing(&mut self, timing: TextInputConfig) {
        self.timing = timing;
        self.caret.period = timing.caret_blink_period;
        self.repeat.delay = timing.key_repeat_delay;
        self.repeat.interval = timing.key_repeat_interval;
    }

    /// Returns the X at which the text starts inside the field.
    ///
    /// Equals the padding until the text plus caret no longer fit, then
    /// moves left by the overflow.
    #[must_use]
    pub fn text_offset(&self) -> f32 {
        let visible = self.state.size.0 - self.timing.padding * 2.0;
        let content = self.display.state().size.0 + self.timing.caret_width;
        if content > visible {
            self.timing.padding - (content - visible)
        } else {
            self.timing.padding
        }
    }

    fn delete_last(&mut self) {
        if self.text.pop().is_some() {
            self.sync_display();
        }
    }

    fn sync_display(&mut self) {
        self.display.set_text(self.text.clone());
    }
}

impl Widget for TextInput {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextInput
    }

    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        let height = self.state.size.1;
        let (text_width, text_height) = self.display.state().size;
        let x = self.text_offset();
        let y = (height - text_height) / 2.0;
        self.display.state_mut().position = (x, y);

        target.fill(self.state.background(), self.corner_radius);
        target.blit(self.display.rendered(), (x, y));

        if self.caret_visible() {
            target.fill_rect(
                Rect::new(x + text_width, y, self.timing.caret_width, text_height),
                self.display.font_color(),
                0.0,
            );
        }
        Ok(())
    }

    fn on_press(&mut self, _button: MouseButton) -> PressResponse {
        PressResponse::Select
    }

    fn on_select(&mut self) {
        self.editing = true;
        self.caret.start();
    }

    fn on_unselect(&mut self) {
        self.editing = false;
        self.caret.stop();
        self.repeat.stop();
    }

    fn process(&mut self, dt: f32) {
        if !self.editing {
            return;
        }
        self.caret.advance(dt);
        for _ in 0..self.repeat.advance(dt) {
            self.delete_last();
        }
    }

    fn as_text_editable(&mut self) -> Option<&mut dyn TextEditable> {
        Some(self)
    }

    fn configure(&mut self, config: &UiConfig) {
        self.set_timing(config.text_input);
        self.display.configure(config);
    }
}

impl TextEditable for TextInput {
    fn key_down(&mut self, key: Key) {
        if !self.editing {
            return;
        }
        if key == Key::Backspace {
            self.delete_last();
            self.caret.restart_visible();
            self.repeat.start();
        }
    }

    fn key_up(&mut self, key: Key) {
        if key == Key::Backspace {
            self.repeat.stop();
        }
    }

    fn text_input(&mut self, text: &str) {
        if !self.editing {
            return;
        }
        let before = self.text.len();
        self.text.extend(text.chars().filter(|c| !c.is_control()));
        if self.text.len() != before {
            self.caret.restart_visible();
            self.sync_display();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    fn field() -> TextInput {
        TextInput::new((500.0, 40.0), (0.0, 0.0)).with_text("wakanda")
    }

    #[test]
    fn test_edit_cycle() {
        let mut input = field();
        assert!(!input.is_editing());

        input.on_select();
        assert!(input.is_editing());

        input.text_input("a");
        assert_eq!(input.text(), "wakandaa");

        input.key_down(Key::Backspace);
        assert_eq!(input.text(), "wakanda");
        assert!(input.is_repeating());

        input.key_up(Key::Backspace);
        assert!(!input.is_repeating());

        input.key_down(Key::Backspace);
        input.on_unselect();
        assert!(!input.is_editing());
        assert!(!input.is_repeating());
        assert_eq!(input.text(), "wakand");
    }

    #[test]
    fn test_ignores_input_while_not_editing() {
        let mut input = field();
        input.text_input("x");
        input.key_down(Key::Backspace);
        assert_eq!(input.text(), "wakanda");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut input = TextInput::new((100.0, 40.0), (0.0, 0.0));
        input.on_select();
        input.text_input("a\u{8}\tb\n");
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_backspace_repeat_timing() {
        let mut input = TextInput::new((500.0, 40.0), (0.0, 0.0)).with_text("abcdefghij");
        input.set_timing(TextInputConfig {
            key_repeat_delay: 0.5,
            key_repeat_interval: 0.1,
            ..TextInputConfig::default()
        });
        input.on_select();

        input.key_down(Key::Backspace);
        assert_eq!(input.text(), "abcdefghi");

        // Still inside the initial delay.
        input.process(0.4);
        assert_eq!(input.text(), "abcdefghi");

        // Delay elapses: first repeat.
        input.process(0.125);
        assert_eq!(input.text(), "abcdefgh");

        // Two more intervals in one frame.
        input.process(0.2);
        assert_eq!(input.text(), "abcdef");

        input.key_up(Key::Backspace);
        input.process(1.0);
        assert_eq!(input.text(), "abcdef");
    }

    #[test]
    fn test_repeat_on_empty_text_is_harmless() {
        let mut input = TextInput::new((500.0, 40.0), (0.0, 0.0)).with_text("a");
        input.on_select();
        input.key_down(Key::Backspace);
        input.process(5.0);
        assert_eq!(input.text(), "");
        assert!(input.is_repeating());
    }

    #[test]
    fn test_caret_blinks_only_while_editing() {
        let mut input = field();
        input.process(0.6);
        assert!(!input.caret_visible());

        input.on_select();
        assert!(input.caret_visible());

        input.process(0.5);
        assert!(!input.caret_visible());

        input.process(0.5);
        assert!(input.caret_visible());

        input.on_unselect();
        assert!(!input.caret_visible());
    }

    #[test]
    fn test_long_text_scrolls_caret_into_view() {
        let mut input = field();
        assert!((input.text_offset() - 8.0).abs() < f32::EPSILON);

        input.set_text("x".repeat(50));
        // 50 glyphs * 12px + 2px caret overflow the 484px interior by 118px.
        assert!((input.text_offset() - (-110.0)).abs() < f32::EPSILON);

        input.on_select();
        let mut surface = Surface::new((500.0, 40.0));
        input.redraw(&mut surface).unwrap();

        assert!(matches!(
            surface.commands().last(),
            Some(RenderCommand::Rect { bounds, .. }) if (bounds.right() - 492.0).abs() < 1e-3
        ));
    }
}
