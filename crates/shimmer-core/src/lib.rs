//! Core types and traits for the Shimmer skeleton-loading widget library.
//!
//! This crate provides the foundations the widget crate builds on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Tweened values and the named-animation registry: [`Tween`], [`Animator`]
//! - Gradient primitives for the shimmer band: [`LinearGradient`], [`BandOffsets`]
//! - Attach/detach lifecycle: [`AttachSession`], [`CancelToken`]
//! - Diagnostics: [`DiagnosticSink`]

mod animation;
mod canvas;
mod color;
mod constraints;
mod diagnostics;
mod draw;
mod easing;
mod geometry;
mod gradient;
mod lifecycle;
pub mod widget;

pub use animation::{duration_from_secs, Animator, Tween, TICK_INTERVAL};
pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use diagnostics::{DiagnosticSink, MemorySink, StderrSink};
pub use draw::DrawCommand;
pub use easing::Easing;
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use gradient::{BandOffsets, GradientStop, LinearGradient, BAND_HALF_WIDTH};
pub use lifecycle::{AttachSession, AttachState, CancelToken, SessionCounter, SessionId};
pub use widget::{LayoutResult, TypeId, Widget, WidgetId};
