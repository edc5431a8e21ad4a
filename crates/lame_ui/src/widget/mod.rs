//! Widget system for UI components.
//!
//! Widgets are the building blocks of a LameUI interface. Containers
//! ([`Panel`]) arrange leaves ([`Text`], [`Button`], [`Slider`],
//! [`TextInput`]) inside a [`WidgetTree`].

mod button;
mod core;
mod panel;
mod slider;
mod text;
mod text_input;
mod tree;

pub use button::{Button, PressCallback};
pub use self::core::{
    AsAny, PressResponse, ReleaseResponse, TextEditable, Widget, WidgetExt, WidgetFlags, WidgetId,
    WidgetKind, WidgetState,
};
pub use panel::Panel;
pub use slider::Slider;
pub use text::Text;
pub use text_input::TextInput;
pub use tree::WidgetTree;
