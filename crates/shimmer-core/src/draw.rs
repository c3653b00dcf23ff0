//! Drawing primitives emitted by widget painting.

use crate::color::Color;
use crate::geometry::{CornerRadius, Rect};
use crate::gradient::GradientStop;
use serde::{Deserialize, Serialize};

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Fill color
        color: Color,
    },

    /// Fill a rectangle with a horizontal linear gradient
    GradientRect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Gradient stops, left to right
        stops: Vec<GradientStop>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            color,
        }
    }

    /// Create a rounded rectangle.
    #[must_use]
    pub fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            color,
        }
    }

    /// Bounds of the command.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { bounds, .. } | Self::GradientRect { bounds, .. } => *bounds,
        }
    }
}
