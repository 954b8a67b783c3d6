//! Parallel bucket reduction over the virtual sample space
//!
//! This module is the single source of truth for turning a slice of the
//! virtual sample space into a per-pixel summary sequence. It handles:
//!
//! - Virtual layout arithmetic (silent prepend/append around the real buffer)
//! - Per-pixel bucket boundaries by integer division
//! - Min/max reduction per bucket per channel, unioned across channels
//! - Cooperative cancellation at bucket granularity
//!
//! Buckets are independent and are distributed across the rayon pool; each
//! worker writes exactly one disjoint output slot, so the parallel phase
//! needs no synchronization beyond the cancel flag itself.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crest_core::SampleBuffer;

use crate::summary::{DisplayMode, SampleData};
use crate::transient::compute_transient_weights;

// ============================================================================
// Virtual Layout
// ============================================================================

/// Placement of the real buffer inside the padded virtual sample space
///
/// The virtual space is `[0, total_virtual())`, with real audio occupying
/// `[prepend, prepend + frames)` and silence on both sides. Padding keeps
/// multiple waveforms time-aligned without copying silence into buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualLayout {
    /// Real sample frames in the buffer
    pub frames: u64,
    /// Silent samples before the real data
    pub prepend: u64,
    /// Silent samples after the real data
    pub append: u64,
}

impl VirtualLayout {
    /// Create a layout for a buffer with the given padding
    pub fn new(frames: u64, prepend: u64, append: u64) -> Self {
        Self {
            frames,
            prepend,
            append,
        }
    }

    /// Total virtual sample count: frames + prepend + append
    #[inline]
    pub fn total_virtual(&self) -> u64 {
        self.frames + self.prepend + self.append
    }

    /// First virtual index holding real data
    #[inline]
    pub fn data_start(&self) -> u64 {
        self.prepend
    }

    /// One past the last virtual index holding real data
    #[inline]
    pub fn data_end(&self) -> u64 {
        self.prepend + self.frames
    }
}

// ============================================================================
// Render Range
// ============================================================================

/// A half-open window `[start, end)` into virtual sample space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRange {
    pub start: u64,
    pub end: u64,
}

impl RenderRange {
    /// Create a range; `end` is clamped up to `start` so count never underflows
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of virtual samples in the range
    #[inline]
    pub fn count(&self) -> u64 {
        self.end - self.start
    }

    /// Check if the range holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Translate both bounds by a signed delta, saturating at zero
    pub fn shifted(&self, delta: i64) -> Self {
        let start = (self.start as i64 + delta).max(0) as u64;
        let end = (self.end as i64 + delta).max(0) as u64;
        Self { start, end }
    }
}

// ============================================================================
// Reduction
// ============================================================================

/// Reduce a render range to one [`SampleData`] per pixel column
///
/// Returns `None` without producing anything when the geometry is
/// degenerate (zero width, or more pixels than samples so the integer
/// samples-per-point underflows to zero) and when the run is cancelled.
/// Callers keep their previous summary in either case.
///
/// Column `p` covers the virtual range
/// `[range.start + p * spp, range.start + (p + 1) * spp)` where
/// `spp = range.count() / width`. Remainder samples past `width * spp`
/// are not visited. Buckets entirely inside padding stay [`SampleData::ZERO`];
/// partial buckets clip to the real buffer. Channel peaks are unioned
/// (min of minima, max of maxima), not averaged.
///
/// The cancel flag is polled once per bucket and once more before
/// returning, so cancellation latency is bounded by a single bucket scan.
pub fn reduce(
    buffer: &SampleBuffer,
    layout: VirtualLayout,
    range: RenderRange,
    width: usize,
    mode: DisplayMode,
    cancel: &AtomicBool,
) -> Option<Vec<SampleData>> {
    if width == 0 {
        return None;
    }
    let samples_per_point = range.count() / width as u64;
    if samples_per_point == 0 {
        return None;
    }

    let data_start = layout.data_start();
    let data_end = layout.data_end();

    let mut summary = vec![SampleData::ZERO; width];

    summary
        .par_iter_mut()
        .enumerate()
        .for_each(|(pixel, slot)| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            let bucket_start = range.start + pixel as u64 * samples_per_point;
            let bucket_end = bucket_start + samples_per_point;

            // Entirely inside the silent prepend/append regions
            if bucket_end <= data_start || bucket_start >= data_end {
                return;
            }

            // Clip the bucket to the real buffer
            let actual_start = (bucket_start.max(data_start) - data_start) as usize;
            let actual_end = (bucket_end.min(data_end) - data_start) as usize;
            if actual_end <= actual_start {
                return;
            }

            let mut min = f32::INFINITY;
            let mut max = f32::NEG_INFINITY;
            for frame in actual_start..actual_end {
                for &value in buffer.frame(frame) {
                    min = min.min(value);
                    max = max.max(value);
                }
            }

            *slot = SampleData::new(min, max);
        });

    if cancel.load(Ordering::Relaxed) {
        return None;
    }

    // Transient scoring depends on adjacent buckets, so it runs after the
    // parallel phase completes, on this thread.
    if mode == DisplayMode::TransientHighlight {
        compute_transient_weights(&mut summary);
    }

    Some(summary)
}
