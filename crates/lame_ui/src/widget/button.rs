//! Clickable button widget.

use std::fmt;

use super::{PressResponse, Text, Widget, WidgetFlags, WidgetKind, WidgetState};
use crate::config::UiConfig;
use crate::error::UiResult;
use crate::input::MouseButton;
use crate::layout::{Alignment, LayoutItem, Sizer};
use crate::render::Surface;
use crate::style::Color;

/// Press handler, called with the pointer button that went down.
pub type PressCallback = Box<dyn FnMut(MouseButton)>;

/// A labelled button with a hover highlight and a press callback.
///
/// The label is an internal [`Text`] centered by the button's own sizer.
/// Pressing a button does not take focus.
pub struct Button {
    state: WidgetState,
    label: Text,
    sizer: Sizer,
    corner_radius: f32,
    on_press: Option<PressCallback>,
}

impl Button {
    /// Creates a button with a centered label.
    #[must_use]
    pub fn new(size: (f32, f32), position: (f32, f32), label: impl Into<String>) -> Self {
        Self {
            state: WidgetState::new(size, position),
            label: Text::new(label),
            sizer: Sizer::vertical().with_alignment(Alignment::CenterBoth),
            corner_radius: 0.0,
            on_press: None,
        }
    }

    /// Rounds the corners.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Sets the label font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.label.set_font_size(font_size);
        self
    }

    /// Sets the label color.
    #[must_use]
    pub fn with_font_color(mut self, color: impl Into<Color>) -> Self {
        self.label.set_font_color(color.into());
        self
    }

    /// Attaches the press handler.
    #[must_use]
    pub fn with_on_press(mut self, callback: impl FnMut(MouseButton) + 'static) -> Self {
        self.on_press = Some(Box::new(callback));
        self
    }

    /// Replaces the press handler.
    pub fn set_on_press(&mut self, callback: impl FnMut(MouseButton) + 'static) {
        self.on_press = Some(Box::new(callback));
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &Text {
        &self.label
    }

    /// Replaces the label text.
    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    /// Returns where the label sits inside the button.
    #[must_use]
    pub fn label_position(&self) -> (f32, f32) {
        let label = self.label.state();
        let item = LayoutItem::new(label.size, label.base_position);
        self.sizer
            .arrange(self.state.size, &[item])
            .first()
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("state", &self.state)
            .field("label", &self.label.text())
            .field("corner_radius", &self.corner_radius)
            .field("has_on_press", &self.on_press.is_some())
            .finish()
    }
}

impl Widget for Button {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        let label_position = self.label_position();
        self.label.state_mut().position = label_position;

        target.fill(self.state.background(), self.corner_radius);
        if self.state.is_hovered() {
            target.fill(self.state.highlight(), self.corner_radius);
        }
        target.blit(self.label.rendered(), label_position);
        Ok(())
    }

    fn is_hoverable(&self) -> bool {
        true
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.state.flags.assign(WidgetFlags::HOVERED, hovered);
    }

    fn on_press(&mut self, button: MouseButton) -> PressResponse {
        if let Some(callback) = self.on_press.as_mut() {
            callback(button);
        }
        PressResponse::Ignore
    }

    fn configure(&mut self, config: &UiConfig) {
        self.label.configure(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;
    use crate::widget::WidgetExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_label_is_centered() {
        let button = Button::new((100.0, 30.0), (0.0, 0.0), "button1");
        // "button1" at 10px is 42x12.
        assert_eq!(button.label_position(), (29.0, 9.0));
    }

    #[test]
    fn test_hover_draws_highlight_overlay() {
        let mut button = Button::new((100.0, 30.0), (0.0, 0.0), "")
            .with_background((50, 10, 220))
            .with_corner_radius(12.0);
        let mut surface = Surface::new((100.0, 30.0));

        button.redraw(&mut surface).unwrap();
        assert_eq!(surface.commands().len(), 1);

        button.set_hovered(true);
        surface.clear();
        button.redraw(&mut surface).unwrap();

        let colors: Vec<Color> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Rect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::rgb(50, 10, 220), Color::rgb(130, 90, 255)]);
    }

    #[test]
    fn test_press_invokes_callback_without_focus() {
        let pressed = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&pressed);
        let mut button = Button::new((100.0, 30.0), (0.0, 0.0), "click")
            .with_on_press(move |button| log.borrow_mut().push(button));

        assert_eq!(button.on_press(MouseButton::Left), PressResponse::Ignore);
        assert_eq!(button.on_press(MouseButton::Right), PressResponse::Ignore);
        assert_eq!(*pressed.borrow(), vec![MouseButton::Left, MouseButton::Right]);
    }

    #[test]
    fn test_press_without_callback_is_noop() {
        let mut button = Button::new((100.0, 30.0), (0.0, 0.0), "idle");
        assert_eq!(button.on_press(MouseButton::Left), PressResponse::Ignore);
    }
}
