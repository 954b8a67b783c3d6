//! Summary value types for waveform display
//!
//! A waveform summary is an ordered sequence of [`SampleData`] entries,
//! one per pixel column. Each entry carries the min/max peak pair for its
//! sample bucket plus a transient emphasis weight filled in by the
//! transient pass when the display mode asks for it.

use serde::{Deserialize, Serialize};

/// One pixel column's reduced sample data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleData {
    /// Minimum sample value over the bucket (across all channels)
    pub min: f32,
    /// Maximum sample value over the bucket (across all channels)
    pub max: f32,
    /// Transient emphasis weight in [0, 1]; 0 until the transient pass runs
    pub transient_weight: f32,
}

impl SampleData {
    /// Identity value for untouched buckets (padding, or not yet computed)
    pub const ZERO: SampleData = SampleData {
        min: 0.0,
        max: 0.0,
        transient_weight: 0.0,
    };

    /// Create a peak pair with no transient weight
    #[inline]
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            transient_weight: 0.0,
        }
    }

    /// Absolute peak of the bucket: max(|min|, |max|)
    #[inline]
    pub fn peak(&self) -> f32 {
        self.min.abs().max(self.max.abs())
    }
}

/// Display mode for waveform rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Plain min/max rendering
    #[default]
    Normal,
    /// Emphasize transients: weights computed, amplitude curve applied at paint time
    TransientHighlight,
}
