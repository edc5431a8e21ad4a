//! Container widget.

use super::{Widget, WidgetKind, WidgetState};
use crate::error::UiResult;
use crate::layout::{Alignment, Direction, Sizer};
use crate::render::Surface;

/// A widget that lays out and composites child widgets.
///
/// Children live in the [`WidgetTree`](super::WidgetTree); the panel owns
/// only its [`Sizer`] and background.
#[derive(Debug, Clone)]
pub struct Panel {
    state: WidgetState,
    sizer: Sizer,
    corner_radius: f32,
}

impl Panel {
    /// Creates a transparent panel with a vertical, unaligned sizer.
    #[must_use]
    pub fn new(size: (f32, f32), position: (f32, f32)) -> Self {
        Self {
            state: WidgetState::new(size, position),
            sizer: Sizer::default(),
            corner_radius: 0.0,
        }
    }

    /// Rounds the background corners.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Sets the layout direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.sizer.direction = direction;
        self
    }

    /// Sets the layout alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.sizer.alignment = alignment;
        self
    }

    /// Sets the spacing between children.
    #[must_use]
    pub fn with_space_between(mut self, space_between: f32) -> Self {
        self.sizer.space_between = space_between;
        self
    }

    /// Returns the background corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

impl Widget for Panel {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        target.fill(self.state.background(), self.corner_radius);
        Ok(())
    }

    fn sizer(&self) -> Option<&Sizer> {
        Some(&self.sizer)
    }

    fn sizer_mut(&mut self) -> Option<&mut Sizer> {
        Some(&mut self.sizer)
    }
}
