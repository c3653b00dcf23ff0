//! Canvas abstraction and the recording implementation used in tests.

use crate::color::Color;
use crate::draw::DrawCommand;
use crate::geometry::{CornerRadius, Rect};
use crate::gradient::LinearGradient;

/// Minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rounded rectangle with a solid color.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Fill a rectangle with a horizontal linear gradient.
    fn fill_gradient(&mut self, rect: Rect, radius: f32, gradient: &LinearGradient);
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (send commands to the host renderer)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::filled_rect(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::rounded_rect(rect, radius, color));
    }

    fn fill_gradient(&mut self, rect: Rect, radius: f32, gradient: &LinearGradient) {
        self.commands.push(DrawCommand::GradientRect {
            bounds: rect,
            radius: CornerRadius::uniform(radius),
            stops: gradient.stops().to_vec(),
        });
    }
}
