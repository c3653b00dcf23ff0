//! Linear gradient primitives for the shimmer band.
//!
//! The moving highlight is three stops on a horizontal gradient: a center
//! stop at the driving value `d` and two flanking stops offset by the band
//! half-width. As `d` rises from 0 to 2 the band sweeps left to right
//! across the control.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Half-width of the shimmer band, in gradient-offset units.
pub const BAND_HALF_WIDTH: f32 = 0.3;

/// The three stop offsets of the shimmer band for a driving value `d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandOffsets {
    /// Leading edge (d - 0.3)
    pub leading: f32,
    /// Band center (d)
    pub center: f32,
    /// Trailing edge (d + 0.3)
    pub trailing: f32,
}

impl BandOffsets {
    /// Compute the band offsets for a driving value.
    #[must_use]
    pub fn at(d: f64) -> Self {
        let center = d as f32;
        Self {
            leading: center - BAND_HALF_WIDTH,
            center,
            trailing: center + BAND_HALF_WIDTH,
        }
    }

    /// Offsets are always emitted in non-decreasing order.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.leading <= self.center && self.center <= self.trailing
    }
}

/// A color anchored at a position along a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis
    pub offset: f32,
    /// Anchored color
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop.
    #[must_use]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// A horizontal (left-to-right) linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Create a gradient from explicit stops.
    #[must_use]
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Create the three-stop shimmer brush: base color at the band edges,
    /// wave color at the center, band initially parked at `d = 0`.
    #[must_use]
    pub fn shimmer(base: Color, wave: Color) -> Self {
        let offsets = BandOffsets::at(0.0);
        Self {
            stops: vec![
                GradientStop::new(offsets.leading, base),
                GradientStop::new(offsets.center, wave),
                GradientStop::new(offsets.trailing, base),
            ],
        }
    }

    /// Get the gradient stops.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Write the band offsets into the three stops.
    ///
    /// No-op for gradients that are not the three-stop shimmer shape.
    pub fn set_band_offsets(&mut self, offsets: BandOffsets) {
        if let [leading, center, trailing] = self.stops.as_mut_slice() {
            leading.offset = offsets.leading;
            center.offset = offsets.center;
            trailing.offset = offsets.trailing;
        }
    }

    /// Read the band offsets back from a three-stop gradient.
    #[must_use]
    pub fn band_offsets(&self) -> Option<BandOffsets> {
        if let [leading, center, trailing] = self.stops.as_slice() {
            Some(BandOffsets {
                leading: leading.offset,
                center: center.offset,
                trailing: trailing.offset,
            })
        } else {
            None
        }
    }
}
