//! Core widget types and traits.

use std::any::Any;
use std::fmt;

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::input::{Key, MouseButton};
use crate::layout::{Rect, Sizer};
use crate::render::Surface;
use crate::style::Color;

/// Handle of a widget inside a [`WidgetTree`](super::WidgetTree).
///
/// Ids are arena indices: stable for the lifetime of the tree and never
/// reused, since widgets are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl WidgetId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Concrete kind of a widget, for typed subtree queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Container.
    Panel,
    /// Static text.
    Text,
    /// Clickable button.
    Button,
    /// Value slider.
    Slider,
    /// Editable text field.
    TextInput,
    /// Application-defined widget.
    Custom,
}

impl WidgetKind {
    /// Returns the kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Text => "text",
            Self::Button => "button",
            Self::Slider => "slider",
            Self::TextInput => "text input",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Widget state flags (bitfield for efficiency).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Pointer is over the widget this frame.
    pub const HOVERED: u32 = 1 << 0;
    /// Widget is the root's selection.
    pub const FOCUSED: u32 = 1 << 1;

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

/// Identity, geometry and appearance shared by every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    /// Display name, for debugging only. Not unique.
    pub name: String,
    /// Size in pixels.
    pub size: (f32, f32),
    /// Offset inside the parent, as resolved by layout.
    pub position: (f32, f32),
    /// Author-specified offset; input to layout, never changed by it.
    pub base_position: (f32, f32),
    /// Parent container (None for the root).
    pub parent: Option<WidgetId>,
    /// State flags.
    pub flags: WidgetFlags,
    background: Color,
    highlight: Color,
    highlight_delta: u8,
}

impl WidgetState {
    /// Creates a transparent, unnamed widget state.
    #[must_use]
    pub fn new(size: (f32, f32), position: (f32, f32)) -> Self {
        Self {
            name: String::new(),
            size,
            position,
            base_position: position,
            parent: None,
            flags: WidgetFlags::default(),
            background: Color::TRANSPARENT,
            highlight: Color::TRANSPARENT.highlighted(Color::HIGHLIGHT_DELTA),
            highlight_delta: Color::HIGHLIGHT_DELTA,
        }
    }

    /// Returns the background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Returns the hover highlight derived from the background.
    #[must_use]
    pub fn highlight(&self) -> Color {
        self.highlight
    }

    /// Sets the background and re-derives the highlight.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.highlight = color.highlighted(self.highlight_delta);
    }

    /// Changes the highlight boost and re-derives the highlight.
    pub fn set_highlight_delta(&mut self, delta: u8) {
        self.highlight_delta = delta;
        self.highlight = self.background.highlighted(delta);
    }

    /// Moves the widget's author-specified offset (and its current position).
    pub fn set_base_position(&mut self, position: (f32, f32)) {
        self.base_position = position;
        self.position = position;
    }

    /// Returns the bounds in parent coordinates.
    #[must_use]
    pub fn local_rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Returns true if the widget is hovered.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Returns true if the widget holds focus.
    #[inline]
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.flags.has(WidgetFlags::FOCUSED)
    }
}

/// What the root should do after a widget handled a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressResponse {
    /// Make the pressed widget the selection.
    Select,
    /// Leave the selection as it is.
    Ignore,
}

/// What the root should do after the selection handled a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseResponse {
    /// Keep the selection.
    Keep,
    /// Clear the selection.
    Deselect,
}

/// Upcasting helper for typed widget access.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Keyboard and text capability of a focusable widget.
pub trait TextEditable {
    /// A key went down.
    fn key_down(&mut self, key: Key);
    /// A key went up.
    fn key_up(&mut self, key: Key);
    /// Committed text arrived.
    fn text_input(&mut self, text: &str);
}

/// Base trait for all widgets.
///
/// Only the state accessors are required. Every other method is a
/// capability with an inert default; the root dispatches on capabilities,
/// never on concrete types.
pub trait Widget: AsAny {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Returns the widget kind.
    fn kind(&self) -> WidgetKind {
        WidgetKind::Custom
    }

    /// Repaints the widget into `target`.
    ///
    /// `target` arrives cleared and sized to the widget. Containers paint
    /// only their own background here; the tree composites their children.
    ///
    /// # Errors
    ///
    /// The default returns [`UiError::RedrawUnimplemented`].
    fn redraw(&mut self, target: &mut Surface) -> UiResult<()> {
        let _ = target;
        Err(UiError::RedrawUnimplemented {
            kind: self.kind(),
            name: self.state().name.clone(),
        })
    }

    /// Returns the layout of a container, or None for leaves.
    fn sizer(&self) -> Option<&Sizer> {
        None
    }

    /// Returns mutable layout of a container, or None for leaves.
    fn sizer_mut(&mut self) -> Option<&mut Sizer> {
        None
    }

    /// Returns true if the widget reacts to hover.
    fn is_hoverable(&self) -> bool {
        false
    }

    /// Marks or clears the per-frame hover flag.
    fn set_hovered(&mut self, hovered: bool) {
        let _ = hovered;
    }

    /// Handles a pointer press on this widget.
    fn on_press(&mut self, button: MouseButton) -> PressResponse {
        let _ = button;
        PressResponse::Select
    }

    /// Handles a pointer release while this widget is selected.
    fn on_release(&mut self, button: MouseButton) -> ReleaseResponse {
        let _ = button;
        ReleaseResponse::Keep
    }

    /// Called after the widget became the selection.
    fn on_select(&mut self) {}

    /// Called before the widget stops being the selection.
    fn on_unselect(&mut self) {}

    /// Receives the pointer every frame while selected.
    ///
    /// `origin` is the widget's absolute top-left corner.
    fn drag_to(&mut self, origin: (f32, f32), pointer: (f32, f32)) {
        let _ = (origin, pointer);
    }

    /// Advances timers by `dt` seconds.
    fn process(&mut self, dt: f32) {
        let _ = dt;
    }

    /// Returns the text editing capability, if any.
    fn as_text_editable(&mut self) -> Option<&mut dyn TextEditable> {
        None
    }

    /// Adopts toolkit configuration when attached under a root.
    fn configure(&mut self, config: &UiConfig) {
        let _ = config;
    }
}

/// Builder methods available on every concrete widget.
pub trait WidgetExt: Widget + Sized {
    /// Sets the display name.
    #[must_use]
    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.state_mut().name = name.into();
        self
    }

    /// Sets the background color.
    #[must_use]
    fn with_background(mut self, color: impl Into<Color>) -> Self {
        self.state_mut().set_background(color.into());
        self
    }

    /// Sets the author-specified offset.
    #[must_use]
    fn with_position(mut self, position: (f32, f32)) -> Self {
        self.state_mut().set_base_position(position);
        self
    }
}

impl<T: Widget> WidgetExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank {
        state: WidgetState,
    }

    impl Widget for Blank {
        fn state(&self) -> &WidgetState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut WidgetState {
            &mut self.state
        }
    }

    #[test]
    fn test_default_redraw_fails_loudly() {
        let mut blank = Blank {
            state: WidgetState::new((10.0, 10.0), (0.0, 0.0)),
        }
        .with_name("blank");

        let mut surface = Surface::new((10.0, 10.0));
        let err = blank.redraw(&mut surface).unwrap_err();
        assert!(matches!(
            err,
            UiError::RedrawUnimplemented { kind: WidgetKind::Custom, ref name } if name == "blank"
        ));
    }

    #[test]
    fn test_background_drives_highlight() {
        let mut state = WidgetState::new((10.0, 10.0), (0.0, 0.0));
        assert_eq!(state.background(), Color::TRANSPARENT);

        state.set_background(Color::rgb(50, 10, 220));
        assert_eq!(state.highlight(), Color::rgb(130, 90, 255));

        state.set_highlight_delta(10);
        assert_eq!(state.highlight(), Color::rgb(60, 20, 230));
    }

    #[test]
    fn test_flags() {
        let mut flags = WidgetFlags::default();
        flags.assign(WidgetFlags::HOVERED, true);
        assert!(flags.has(WidgetFlags::HOVERED));
        assert!(!flags.has(WidgetFlags::FOCUSED));

        flags.assign(WidgetFlags::HOVERED, false);
        assert_eq!(flags, WidgetFlags::default());
    }

    #[test]
    fn test_defaults_select_on_press() {
        let mut blank = Blank {
            state: WidgetState::new((1.0, 1.0), (0.0, 0.0)),
        };
        assert_eq!(blank.on_press(MouseButton::Right), PressResponse::Select);
        assert_eq!(blank.on_release(MouseButton::Right), ReleaseResponse::Keep);
        assert!(blank.as_text_editable().is_none());
        assert!(blank.sizer().is_none());
    }
}
