//! # LameUI
//!
//! Retained-mode widget toolkit for immediate-mode drawing backends:
//! - Panels laid out by a linear sizer (vertical/horizontal, centered)
//! - Text, buttons, sliders and single-line text fields
//! - One hover target and one focused selection per root
//! - Per-widget surfaces composited bottom-up each frame
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                         │
//! ├────────────────────────────────────────────────────────┤
//! │  InputEvent → UiRoot → process(dt) → Sizer → Surface   │
//! │       ↓          ↓           ↓          ↓        ↓     │
//! │  Hit Testing  Selection   Timers    Layout  UIRenderer │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use lame_ui::{Button, InputEvent, MouseButton, Panel, UiRoot, WidgetExt};
//!
//! let mut ui = UiRoot::new((800.0, 600.0), (22, 22, 22));
//! let panel = ui
//!     .add_to_root(Panel::new((400.0, 300.0), (20.0, 20.0)).with_background((55, 55, 55)))
//!     .unwrap();
//! ui.add(panel, Button::new((120.0, 30.0), (0.0, 0.0), "Click")).unwrap();
//!
//! ui.frame(
//!     [
//!         InputEvent::PointerMove { x: 30.0, y: 30.0 },
//!         InputEvent::PointerDown(MouseButton::Left),
//!     ],
//!     1.0 / 60.0,
//! )
//! .unwrap();
//! assert!(!ui.surface().is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod root;
pub mod style;
pub mod widget;

pub use config::{FontConfig, RootConfig, TextInputConfig, UiConfig};
pub use error::{UiError, UiResult};
pub use input::{InputEvent, Key, MouseButton, PointerState};
pub use layout::{Alignment, Direction, LayoutItem, Rect, Sizer};
pub use render::{tessellate, RenderCommand, Surface, TextRasterizer, UIBatch, UIRenderer, UIVertex};
pub use root::UiRoot;
pub use style::Color;
pub use widget::{
    Button, Panel, PressResponse, ReleaseResponse, Slider, Text, TextEditable, TextInput, Widget,
    WidgetExt, WidgetId, WidgetKind, WidgetState, WidgetTree,
};
