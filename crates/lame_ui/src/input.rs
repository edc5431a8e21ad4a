//! Input events and pointer state.
//!
//! The windowing layer translates OS events into [`InputEvent`]s and feeds
//! them to [`UiRoot`](crate::UiRoot) once per frame. The pointer position is
//! not carried by press/release events; it is polled from [`PointerState`],
//! which tracks the last [`InputEvent::PointerMove`].

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
///
/// Only keys the widgets act on are named; everything else arrives as a raw
/// backend keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Any other key, by backend keycode.
    Other(u32),
}

/// One input event, in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute position.
    PointerMove {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// Pointer button went down at the current pointer position.
    PointerDown(MouseButton),
    /// Pointer button went up.
    PointerUp(MouseButton),
    /// Key went down.
    KeyDown(Key),
    /// Key went up.
    KeyUp(Key),
    /// Committed text (already composed by the platform).
    TextInput(String),
    /// The window was resized.
    Resize {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
}

/// Pointer position and held buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Current pointer X position.
    pub x: f32,
    /// Current pointer Y position.
    pub y: f32,
    /// Mouse buttons currently held.
    buttons_down: u8,
}

impl PointerState {
    /// Creates a pointer state at the origin with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pointer position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Updates the pointer position.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Records a button press.
    pub fn press(&mut self, button: MouseButton) {
        self.buttons_down |= Self::button_mask(button);
    }

    /// Records a button release.
    pub fn release(&mut self, button: MouseButton) {
        self.buttons_down &= !Self::button_mask(button);
    }

    /// Returns true if the button is currently held.
    #[must_use]
    pub fn is_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns the bit mask for a button.
    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask_tracking() {
        let mut pointer = PointerState::new();

        pointer.press(MouseButton::Left);
        pointer.press(MouseButton::Middle);
        assert!(pointer.is_down(MouseButton::Left));
        assert!(!pointer.is_down(MouseButton::Right));

        pointer.release(MouseButton::Left);
        assert!(!pointer.is_down(MouseButton::Left));
        assert!(pointer.is_down(MouseButton::Middle));
    }

    #[test]
    fn test_position_is_polled() {
        let mut pointer = PointerState::new();
        pointer.set_position(12.5, 40.0);
        assert_eq!(pointer.position(), (12.5, 40.0));
    }
}
