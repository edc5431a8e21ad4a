//! Drag-to-value slider widget.

use super::{PressResponse, ReleaseResponse, Widget, WidgetKind, WidgetState};
use crate::error::{UiError, UiResult};
use crate::input::MouseButton;
use crate::layout::Rect;
use crate::render::Surface;
use crate::style::Color;

/// Horizontal slider holding a normalized value mapped onto `[min, max]`.
///
/// The knob is a circle whose radius is half the widget height; the bar
/// spans the width between the two knob margins. A left press captures the
/// pointer until release.
#[derive(Debug, Clone)]
pub struct Slider {
    state: WidgetState,
    value: f32,
    min_value: f32,
    max_value: f32,
    knob_color: Color,
    bar_color: Color,
}

impl Slider {
    /// Bar thickness as a fraction of the widget height.
    const BAR_HEIGHT_RATIO: f32 = 0.45;

    /// Creates a slider over `[min_value, max_value]`, starting halfway.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidSliderRange`] unless
    /// `min_value < max_value` and `max_value > 0`.
    pub fn new(
        size: (f32, f32),
        position: (f32, f32),
        min_value: f32,
        max_value: f32,
    ) -> UiResult<Self> {
        if !(min_value < max_value && max_value > 0.0) {
            return Err(UiError::InvalidSliderRange {
                min: min_value,
                max: max_value,
            });
        }

        Ok(Self {
            state: WidgetState::new(size, position),
            value: 0.5,
            min_value,
            max_value,
            knob_color: Color::BLUE,
            bar_color: Color::RED,
        })
    }

    /// Starts at a value in `[min, max]` (clamped).
    #[must_use]
    pub fn with_start_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    /// Sets the knob color.
    #[must_use]
    pub fn with_knob_color(mut self, color: impl Into<Color>) -> Self {
        self.knob_color = color.into();
        self
    }

    /// Sets the bar color.
    #[must_use]
    pub fn with_bar_color(mut self, color: impl Into<Color>) -> Self {
        self.bar_color = color.into();
        self
    }

    /// Returns the value mapped onto `[min, max]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        (self.max_value - self.min_value) * self.value + self.min_value
    }

    /// Returns the normalized value in `[0, 1]`.
    #[must_use]
    pub fn normalized(&self) -> f32 {
        self.value
    }

    /// Returns `(min, max)`.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.min_value, self.max_value)
    }

    /// Sets the value from `[min, max]` (clamped).
    pub fn set_value(&mut self, value: f32) {
        let normalized = (value - self.min_value) / (self.max_value - self.min_value);
        self.set_normalized(normalized);
    }

    /// Sets the normalized value (clamped to `[0, 1]`).
    pub fn set_normalized(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    fn knob_radius(&self) -> f32 {
        self.state.size.1 / 2.0
    }

    fn bar_width(&self) -> f32 {
        self.state.size.0 - self.knob_radius() * 2.0
    }

    /// Returns the normalized value a pointer at absolute `pointer_x` maps
    /// to, for a slider whose absolute left edge is `origin_x`.
    #[must_use]
    pub fn value_at(&self, origin_x: f32, pointer_x: f32) -> f32 {
        let bar_width = self.bar_width();
        if bar_width <= 0.0 {
            return if pointer_x < origin_x + self.knob_radius() { 0.0 } else { 1.0 };
        }
        ((pointer_x - (origin_x + self.knob_radius())) / bar_width).clamp(0.0, 1.0)
    }
}

impl Widget for Slider {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Slider
    }

    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        let (width, height) = self.state.size;
        let knob_radius = self.knob_radius();
        let bar_width = self.bar_width();
        let bar_height = height * Self::BAR_HEIGHT_RATIO;

        target.fill(self.state.background(), 0.0);
        target.fill_rect(
            Rect::new(knob_radius, height / 2.0 - bar_height / 2.0, bar_width, bar_height),
            self.bar_color,
            0.0,
        );

        let knob_x = (bar_width * self.value + knob_radius).min(width);
        target.fill_circle((knob_x, height / 2.0), knob_radius, self.knob_color);
        Ok(())
    }

    fn on_press(&mut self, button: MouseButton) -> PressResponse {
        if button == MouseButton::Left {
            PressResponse::Select
        } else {
            PressResponse::Ignore
        }
    }

    fn on_release(&mut self, _button: MouseButton) -> ReleaseResponse {
        ReleaseResponse::Deselect
    }

    fn drag_to(&mut self, origin: (f32, f32), pointer: (f32, f32)) {
        self.value = self.value_at(origin.0, pointer.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    fn color_slider() -> Slider {
        Slider::new((700.0, 40.0), (0.0, 30.0), 0.0, 255.0)
            .unwrap()
            .with_start_value(128.0)
    }

    #[test]
    fn test_start_value_round_trip() {
        let slider = color_slider();
        assert!((slider.value() - 128.0).abs() < 1e-3);
    }

    #[test]
    fn test_default_start_is_halfway() {
        let slider = Slider::new((100.0, 20.0), (0.0, 0.0), 10.0, 20.0).unwrap();
        assert!((slider.value() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_start_value_is_clamped() {
        let slider = color_slider().with_start_value(999.0);
        assert!((slider.normalized() - 1.0).abs() < f32::EPSILON);

        let slider = color_slider().with_start_value(-5.0);
        assert!(slider.normalized().abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_ranges_fail_construction() {
        assert!(matches!(
            Slider::new((10.0, 10.0), (0.0, 0.0), 5.0, 5.0),
            Err(UiError::InvalidSliderRange { .. })
        ));
        assert!(matches!(
            Slider::new((10.0, 10.0), (0.0, 0.0), 9.0, 1.0),
            Err(UiError::InvalidSliderRange { .. })
        ));
        assert!(matches!(
            Slider::new((10.0, 10.0), (0.0, 0.0), -5.0, 0.0),
            Err(UiError::InvalidSliderRange { .. })
        ));
    }

    #[test]
    fn test_drag_maps_pointer_with_knob_margins() {
        let mut slider = color_slider();

        // Knob radius 20, bar 660 wide, slider origin at x = 100.
        slider.drag_to((100.0, 0.0), (120.0, 0.0));
        assert!(slider.value().abs() < 1e-3);

        slider.drag_to((100.0, 0.0), (780.0, 0.0));
        assert!((slider.value() - 255.0).abs() < 1e-3);

        slider.drag_to((100.0, 0.0), (450.0, 0.0));
        assert!((slider.normalized() - 0.5).abs() < 1e-6);

        slider.drag_to((100.0, 0.0), (-50.0, 0.0));
        assert!(slider.normalized().abs() < f32::EPSILON);
    }

    #[test]
    fn test_drag_is_monotonic() {
        let mut slider = color_slider();
        let mut last = f32::NEG_INFINITY;
        for step in 0..=90 {
            #[allow(clippy::cast_precision_loss)]
            let x = step as f32 * 10.0;
            slider.drag_to((0.0, 0.0), (x, 0.0));
            assert!(slider.value() >= last);
            last = slider.value();
        }
    }

    #[test]
    fn test_press_and_release_capture() {
        let mut slider = color_slider();
        assert_eq!(slider.on_press(MouseButton::Left), PressResponse::Select);
        assert_eq!(slider.on_press(MouseButton::Right), PressResponse::Ignore);
        assert_eq!(slider.on_release(MouseButton::Left), ReleaseResponse::Deselect);
    }

    #[test]
    fn test_redraw_places_knob() {
        let mut slider = color_slider().with_start_value(0.0);
        let mut surface = Surface::new((700.0, 40.0));
        slider.redraw(&mut surface).unwrap();

        assert!(matches!(
            surface.commands().last(),
            Some(RenderCommand::Circle { center, radius, .. })
                if *center == (20.0, 20.0) && *radius == 20.0
        ));
    }
}
