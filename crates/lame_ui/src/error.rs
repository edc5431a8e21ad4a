//! # UI Error Types
//!
//! All errors that can occur while building or driving a widget tree.
//! Failed lookups during input routing (no widget under the pointer, no
//! selection) are not errors; they come back as `None`.

use thiserror::Error;

use crate::widget::{WidgetId, WidgetKind};

/// Errors that can occur in the UI system.
#[derive(Error, Debug)]
pub enum UiError {
    /// Slider bounds violate `min < max` or `max > 0`.
    #[error("invalid slider range: min {min} must be below max {max} and max must be positive")]
    InvalidSliderRange {
        /// Requested minimum.
        min: f32,
        /// Requested maximum.
        max: f32,
    },

    /// A widget kind was asked to redraw but has no redraw behavior.
    #[error("redraw is not implemented for {kind} widget {name:?}")]
    RedrawUnimplemented {
        /// Kind of the offending widget.
        kind: WidgetKind,
        /// Its display name (may be empty).
        name: String,
    },

    /// No widget with this id exists in the tree.
    #[error("unknown widget: {0}")]
    UnknownWidget(WidgetId),

    /// The widget exists but is not of the requested concrete type.
    #[error("widget {id} is not a {expected}")]
    WidgetType {
        /// Widget that was looked up.
        id: WidgetId,
        /// Requested type name.
        expected: &'static str,
    },

    /// The widget cannot hold children.
    #[error("widget {0} is not a container")]
    NotAContainer(WidgetId),

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for [`UiConfig`](crate::UiConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
