//! Viewport state for waveform displays
//!
//! Tracks the visible window into virtual sample space together with the
//! pixel width it is rendered at, and converts between screen positions
//! and sample indices. Pure data and arithmetic; regeneration scheduling
//! lives in the generator.
//!
//! The viewport may be scaled against an externally supplied global total
//! instead of its own virtual length, so several waveforms rendered side
//! by side share one proportional axis.

use crate::reduce::{RenderRange, VirtualLayout};

/// Visible-window state for one waveform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Placement of the real buffer in virtual sample space
    layout: VirtualLayout,
    /// Shared axis length overriding the virtual total when set
    global_total: Option<u64>,
    /// Currently visible window
    range: RenderRange,
    /// Render width in pixels; conversions are no-ops at 0
    width: f32,
}

impl Viewport {
    /// Create a viewport over a buffer with the given padding
    ///
    /// The initial render range spans the full effective total.
    pub fn new(frames: u64, prepend: u64, append: u64, global_total: Option<u64>) -> Self {
        let layout = VirtualLayout::new(frames, prepend, append);
        let total = global_total.unwrap_or_else(|| layout.total_virtual());
        Self {
            layout,
            global_total,
            range: RenderRange::new(0, total),
            width: 0.0,
        }
    }

    // ------------------------------------------------------------------
    // Derived reads
    // ------------------------------------------------------------------

    /// Current layout (frames plus padding)
    #[inline]
    pub fn layout(&self) -> VirtualLayout {
        self.layout
    }

    /// Current render range
    #[inline]
    pub fn range(&self) -> RenderRange {
        self.range
    }

    /// Current pixel width
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Externally supplied global total, if any
    #[inline]
    pub fn global_total(&self) -> Option<u64> {
        self.global_total
    }

    /// Virtual sample count: frames + prepend + append
    #[inline]
    pub fn total_virtual(&self) -> u64 {
        self.layout.total_virtual()
    }

    /// Sample count used for proportional scaling
    #[inline]
    pub fn effective_total(&self) -> u64 {
        self.global_total.unwrap_or_else(|| self.layout.total_virtual())
    }

    /// Lower render bound as a fraction of the effective total
    pub fn visible_start(&self) -> f64 {
        let total = self.effective_total();
        if total == 0 {
            return 0.0;
        }
        self.range.start as f64 / total as f64
    }

    /// Upper render bound as a fraction of the effective total
    pub fn visible_end(&self) -> f64 {
        let total = self.effective_total();
        if total == 0 {
            return 0.0;
        }
        self.range.end as f64 / total as f64
    }

    /// Whether the window starts at virtual sample 0
    #[inline]
    pub fn is_at_leading_edge(&self) -> bool {
        self.range.start == 0
    }

    /// Whether the window reaches the effective total
    #[inline]
    pub fn is_at_trailing_edge(&self) -> bool {
        self.range.end >= self.effective_total()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Set the render width in pixels
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Set the visible window, clamped into `[0, effective_total]`
    pub fn set_range(&mut self, range: RenderRange) {
        let total = self.effective_total();
        self.range = RenderRange::new(range.start.min(total), range.end.min(total));
    }

    /// Set or clear the shared global total
    ///
    /// The render range is re-clamped against the new axis length.
    pub fn set_global_total(&mut self, global_total: Option<u64>) {
        self.global_total = global_total;
        self.set_range(self.range);
    }

    /// Change padding while keeping the same audio content in view
    ///
    /// The window shifts by the prepend delta, so a sample under a given
    /// pixel stays under that pixel. Bounds clamp to the new virtual total;
    /// the window length is preserved whenever clamping permits.
    pub fn update_padding(&mut self, prepend: u64, append: u64) {
        let delta = prepend as i64 - self.layout.prepend as i64;
        let count = self.range.count();

        self.layout.prepend = prepend;
        self.layout.append = append;

        let start = (self.range.start as i64 + delta).max(0) as u64;
        let end = (start + count).min(self.layout.total_virtual());
        self.range = RenderRange::new(start, end);
    }

    /// Change padding without moving the window
    ///
    /// The audio content shifts within the fixed window instead, making
    /// the padding change itself visible.
    pub fn reset_padding(&mut self, prepend: u64, append: u64) {
        self.layout.prepend = prepend;
        self.layout.append = append;
    }

    /// Overwrite padding and range unconditionally (undo/revert)
    pub fn restore_state(&mut self, prepend: u64, append: u64, range: RenderRange) {
        self.layout.prepend = prepend;
        self.layout.append = append;
        self.range = range;
    }

    // ------------------------------------------------------------------
    // Coordinate conversions
    // ------------------------------------------------------------------

    /// Convert a pixel position to a virtual sample index
    ///
    /// Clamped to `[0, effective_total]`. Returns the window start when
    /// the width is zero.
    pub fn position_to_sample(&self, x: f32) -> u64 {
        if self.width <= 0.0 {
            return self.range.start;
        }
        let offset = (x as f64 * self.range.count() as f64 / self.width as f64).round() as i64;
        let sample = self.range.start as i64 + offset;
        sample.clamp(0, self.effective_total() as i64) as u64
    }

    /// Convert a virtual sample index to a pixel position
    ///
    /// Samples left of the window map to negative positions. Returns 0
    /// when the width is zero or the window is empty.
    pub fn sample_to_position(&self, sample: u64) -> f32 {
        if self.width <= 0.0 || self.range.is_empty() {
            return 0.0;
        }
        let offset = sample as f64 - self.range.start as f64;
        (offset * self.width as f64 / self.range.count() as f64) as f32
    }

    /// Translate a sample index by a pixel delta
    ///
    /// Clamped to `[0, effective_total]`. Returns the input unchanged when
    /// the width is zero.
    pub fn offset_sample(&self, sample: u64, dx: f32) -> u64 {
        if self.width <= 0.0 {
            return sample;
        }
        let delta = (dx as f64 * self.range.count() as f64 / self.width as f64).round() as i64;
        (sample as i64 + delta).clamp(0, self.effective_total() as i64) as u64
    }

    // ------------------------------------------------------------------
    // Zoom / pan
    // ------------------------------------------------------------------

    /// Zoom by a factor about the window midpoint
    ///
    /// Factors above 1 zoom in (fewer samples per pixel). The new window
    /// is clamped into `[0, effective_total]` and never collapses below
    /// one sample.
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let total = self.effective_total();
        let count = self.range.count();
        if total == 0 || count == 0 {
            return;
        }

        let new_count = ((count as f64 / factor).round() as u64).clamp(1, total);
        let midpoint = self.range.start as f64 + count as f64 / 2.0;
        let ideal_start = (midpoint - new_count as f64 / 2.0).round().max(0.0) as u64;
        let start = ideal_start.min(total - new_count);

        self.range = RenderRange::new(start, start + new_count);
    }

    /// Pan by a pixel delta, returning the sample delta actually applied
    ///
    /// Clamping moves both bounds together so the window length is
    /// preserved; the clamped (not requested) delta is returned so callers
    /// accumulating an external offset stay consistent with the view.
    pub fn pan_pixels(&mut self, dx: f32) -> i64 {
        if self.width <= 0.0 {
            return 0;
        }
        let requested = (dx as f64 * self.range.count() as f64 / self.width as f64).round() as i64;
        self.pan_samples(requested)
    }

    /// Pan by a sample delta, returning the delta actually applied
    pub fn pan_samples(&mut self, delta: i64) -> i64 {
        let total = self.effective_total();
        let low = -(self.range.start as i64);
        let high = total.saturating_sub(self.range.end) as i64;
        if low > high {
            return 0;
        }

        let applied = delta.clamp(low, high);
        self.range = self.range.shifted(applied);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        // 10_000 real frames, 1_000 prepended, no append: total 11_000
        let mut viewport = Viewport::new(10_000, 1_000, 0, None);
        viewport.set_width(100.0);
        viewport
    }

    #[test]
    fn test_totals() {
        let viewport = viewport();
        assert_eq!(viewport.total_virtual(), 11_000);
        assert_eq!(viewport.effective_total(), 11_000);

        let mut shared = viewport;
        shared.set_global_total(Some(20_000));
        assert_eq!(shared.total_virtual(), 11_000);
        assert_eq!(shared.effective_total(), 20_000);
    }

    #[test]
    fn test_initial_range_spans_effective_total() {
        let viewport = viewport();
        assert_eq!(viewport.range(), RenderRange::new(0, 11_000));
        assert!(viewport.is_at_leading_edge());
        assert!(viewport.is_at_trailing_edge());
    }

    #[test]
    fn test_visible_fractions() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(2_750, 5_500));
        assert!((viewport.visible_start() - 0.25).abs() < 1e-12);
        assert!((viewport.visible_end() - 0.5).abs() < 1e-12);
        assert!(!viewport.is_at_leading_edge());
        assert!(!viewport.is_at_trailing_edge());
    }

    #[test]
    fn test_set_range_clamps_to_effective_total() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(10_000, 50_000));
        assert_eq!(viewport.range(), RenderRange::new(10_000, 11_000));
    }

    #[test]
    fn test_shrinking_global_total_reclamps_range() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(0, 11_000));
        viewport.set_global_total(Some(6_000));
        assert_eq!(viewport.range(), RenderRange::new(0, 6_000));
    }

    #[test]
    fn test_update_padding_shifts_range() {
        let mut viewport = Viewport::new(10_000, 0, 0, None);
        viewport.set_width(100.0);
        viewport.set_range(RenderRange::new(0, 5_000));

        viewport.update_padding(1_000, 0);

        // Same content stays in view: the window shifted with the padding
        assert_eq!(viewport.range(), RenderRange::new(1_000, 6_000));
        assert_eq!(viewport.range().count(), 5_000);
        assert_eq!(viewport.total_virtual(), 11_000);
    }

    #[test]
    fn test_update_padding_clamps_at_zero() {
        let mut viewport = Viewport::new(10_000, 2_000, 0, None);
        viewport.set_width(100.0);
        viewport.set_range(RenderRange::new(500, 4_500));

        // Removing more prepend than the window start leaves start at 0
        viewport.update_padding(0, 0);
        assert_eq!(viewport.range(), RenderRange::new(0, 4_000));
    }

    #[test]
    fn test_reset_padding_leaves_range_alone() {
        let mut viewport = Viewport::new(10_000, 0, 0, None);
        viewport.set_width(100.0);
        viewport.set_range(RenderRange::new(0, 5_000));

        viewport.reset_padding(1_000, 0);

        assert_eq!(viewport.range(), RenderRange::new(0, 5_000));
        assert_eq!(viewport.total_virtual(), 11_000);
    }

    #[test]
    fn test_restore_state_overwrites_everything() {
        let mut viewport = viewport();
        viewport.restore_state(300, 700, RenderRange::new(200, 4_200));

        assert_eq!(viewport.layout().prepend, 300);
        assert_eq!(viewport.layout().append, 700);
        assert_eq!(viewport.range(), RenderRange::new(200, 4_200));
        assert_eq!(viewport.total_virtual(), 11_000);
    }

    #[test]
    fn test_position_sample_round_trip() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(1_000, 6_000));

        // 5_000 samples over 100 px: 50 samples per pixel
        assert_eq!(viewport.position_to_sample(0.0), 1_000);
        assert_eq!(viewport.position_to_sample(50.0), 3_500);
        assert_eq!(viewport.sample_to_position(3_500), 50.0);
        assert_eq!(viewport.sample_to_position(1_000), 0.0);
    }

    #[test]
    fn test_position_to_sample_clamps() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(0, 11_000));
        assert_eq!(viewport.position_to_sample(-10.0), 0);
        assert_eq!(viewport.position_to_sample(1_000.0), 11_000);
    }

    #[test]
    fn test_offset_sample() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(1_000, 6_000));

        assert_eq!(viewport.offset_sample(2_000, 10.0), 2_500);
        assert_eq!(viewport.offset_sample(2_000, -10.0), 1_500);
        // Clamped at the axis ends
        assert_eq!(viewport.offset_sample(100, -10.0), 0);
        assert_eq!(viewport.offset_sample(10_900, 10.0), 11_000);
    }

    #[test]
    fn test_conversions_noop_at_zero_width() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(1_000, 6_000));
        viewport.set_width(0.0);

        assert_eq!(viewport.position_to_sample(42.0), 1_000);
        assert_eq!(viewport.sample_to_position(3_500), 0.0);
        assert_eq!(viewport.offset_sample(2_000, 10.0), 2_000);
        assert_eq!(viewport.pan_pixels(10.0), 0);
    }

    #[test]
    fn test_zoom_in_recenters() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(1_000, 9_000));

        viewport.zoom(2.0);

        // Count halves around the midpoint at 5_000
        assert_eq!(viewport.range(), RenderRange::new(3_000, 7_000));
    }

    #[test]
    fn test_zoom_out_clamps_to_axis() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(0, 4_000));

        viewport.zoom(0.25);

        // 16_000 samples don't fit in an 11_000 axis
        assert_eq!(viewport.range(), RenderRange::new(0, 11_000));
    }

    #[test]
    fn test_zoom_never_collapses() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(5_000, 5_002));
        viewport.zoom(1_000.0);
        assert!(viewport.range().count() >= 1);
    }

    #[test]
    fn test_pan_returns_applied_delta() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(1_000, 6_000));

        // 50 samples per pixel
        let applied = viewport.pan_pixels(10.0);
        assert_eq!(applied, 500);
        assert_eq!(viewport.range(), RenderRange::new(1_500, 6_500));
    }

    #[test]
    fn test_pan_clamps_and_reports_clamped_delta() {
        let mut viewport = viewport();
        viewport.set_range(RenderRange::new(500, 5_500));

        // Requested -20 px = -1_000 samples, but only 500 are available
        let applied = viewport.pan_pixels(-20.0);
        assert_eq!(applied, -500);
        assert_eq!(viewport.range(), RenderRange::new(0, 5_000));
        assert_eq!(viewport.range().count(), 5_000);
    }
}
