//! Summary generation orchestration
//!
//! [`SummaryGenerator`] owns one buffer's viewport and keeps its summary
//! sequence current: every viewport or mode mutation cancels whatever
//! reduction is still in flight and queues a fresh one, so deliveries are
//! single-flight per generator and the consumer only ever observes the
//! summary for the most recently requested state.
//!
//! ## Usage
//!
//! ```ignore
//! let mut generator = SummaryGenerator::new(buffer, 1_000, 0, None);
//! generator.set_width(800.0);
//!
//! // In the host's tick handler:
//! if generator.poll() {
//!     repaint(generator.summary());
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crest_core::config::SummaryConfig;
use crest_core::SampleBuffer;

use crate::computer::{SummaryComputer, SummaryRequest};
use crate::events::{EventBus, SummaryEvent};
use crate::reduce::RenderRange;
use crate::summary::{DisplayMode, SampleData};
use crate::viewport::Viewport;

/// Owns a viewport and keeps its summary sequence regenerated
pub struct SummaryGenerator {
    /// Decoded sample buffer, shared read-only with reduction workers
    buffer: Arc<SampleBuffer>,
    /// Visible-window state and conversion arithmetic
    viewport: Viewport,
    /// Current display mode
    mode: DisplayMode,
    /// Background reduction thread
    computer: SummaryComputer,
    /// Update notifications for subscribers
    events: EventBus,
    /// Cancel flag of the run currently in flight, if any
    cancel: Option<Arc<AtomicBool>>,
    /// Generation of the most recently issued request
    generation: u64,
    /// Last delivered summary; empty until the first delivery
    summary: Vec<SampleData>,
}

impl SummaryGenerator {
    /// Create a generator over a decoded buffer with the given padding
    ///
    /// The width starts at zero, so nothing is computed until the host
    /// reports its layout via [`set_width`](Self::set_width).
    pub fn new(
        buffer: Arc<SampleBuffer>,
        prepend: u64,
        append: u64,
        global_total: Option<u64>,
    ) -> Self {
        let viewport = Viewport::new(buffer.frames() as u64, prepend, append, global_total);
        Self {
            buffer,
            viewport,
            mode: DisplayMode::Normal,
            computer: SummaryComputer::spawn(),
            events: EventBus::default(),
            cancel: None,
            generation: 0,
            summary: Vec::new(),
        }
    }

    /// Create a generator seeded from host configuration
    pub fn with_config(
        buffer: Arc<SampleBuffer>,
        prepend: u64,
        append: u64,
        global_total: Option<u64>,
        config: &SummaryConfig,
    ) -> Self {
        let mut generator = Self::new(buffer, prepend, append, global_total);
        if config.transient_highlight {
            generator.mode = DisplayMode::TransientHighlight;
        }
        generator.set_width(config.default_width as f32);
        generator
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// The last delivered summary sequence (empty before the first delivery)
    #[inline]
    pub fn summary(&self) -> &[SampleData] {
        &self.summary
    }

    /// Viewport state, for conversions and derived reads
    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current display mode
    #[inline]
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Subscribe to update notifications
    pub fn subscribe(&self) -> crossbeam::channel::Receiver<SummaryEvent> {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Mutations (each cancels in-flight work and regenerates)
    // ------------------------------------------------------------------

    /// Set the render width in pixels
    pub fn set_width(&mut self, width: f32) {
        self.viewport.set_width(width);
        self.regenerate();
    }

    /// Set the visible window
    pub fn set_render_range(&mut self, range: RenderRange) {
        self.viewport.set_range(range);
        self.regenerate();
    }

    /// Set or clear the shared global total
    pub fn set_global_total(&mut self, global_total: Option<u64>) {
        self.viewport.set_global_total(global_total);
        self.regenerate();
    }

    /// Switch display modes
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.regenerate();
    }

    /// Change padding, keeping the same content under the window
    pub fn update_padding(&mut self, prepend: u64, append: u64) {
        self.viewport.update_padding(prepend, append);
        self.regenerate();
    }

    /// Change padding without moving the window
    pub fn reset_padding(&mut self, prepend: u64, append: u64) {
        self.viewport.reset_padding(prepend, append);
        self.regenerate();
    }

    /// Restore padding and range from a snapshot (undo/revert)
    pub fn restore_state(&mut self, prepend: u64, append: u64, range: RenderRange) {
        self.viewport.restore_state(prepend, append, range);
        self.regenerate();
    }

    /// Zoom about the window midpoint
    pub fn zoom(&mut self, factor: f64) {
        self.viewport.zoom(factor);
        self.regenerate();
    }

    /// Pan by pixels, returning the sample delta actually applied
    pub fn pan_pixels(&mut self, dx: f32) -> i64 {
        let applied = self.viewport.pan_pixels(dx);
        if applied != 0 {
            self.regenerate();
        }
        applied
    }

    // ------------------------------------------------------------------
    // Conversions (delegated)
    // ------------------------------------------------------------------

    /// Convert a pixel position to a virtual sample index
    pub fn position_to_sample(&self, x: f32) -> u64 {
        self.viewport.position_to_sample(x)
    }

    /// Convert a virtual sample index to a pixel position
    pub fn sample_to_position(&self, sample: u64) -> f32 {
        self.viewport.sample_to_position(sample)
    }

    /// Translate a sample index by a pixel delta
    pub fn offset_sample(&self, sample: u64, dx: f32) -> u64 {
        self.viewport.offset_sample(sample, dx)
    }

    // ------------------------------------------------------------------
    // Delivery
    // ------------------------------------------------------------------

    /// Drain finished reductions, applying the one for the latest request
    ///
    /// Call from the coordination context (the host's tick handler).
    /// Returns true when a new summary was applied. Results from
    /// superseded requests are discarded, never applied.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Some(result) = self.computer.try_recv() {
            if result.generation != self.generation {
                log::debug!(
                    "Discarding stale summary generation={} (current {})",
                    result.generation,
                    self.generation
                );
                continue;
            }

            self.events.publish(SummaryEvent::SummaryUpdated {
                generation: result.generation,
                range: result.range,
                width: result.width,
                mode: result.mode,
            });
            self.summary = result.summary;
            self.cancel = None;
            applied = true;
        }
        applied
    }

    /// Cancel in-flight work and queue a reduction for the current state
    fn regenerate(&mut self) {
        // Supersede first: a set flag is never delivered, so at most one
        // delivery can be pending per generator.
        if let Some(cancel) = self.cancel.take() {
            cancel.store(true, Ordering::Relaxed);
        }

        self.events.publish(SummaryEvent::ViewportChanged {
            range: self.viewport.range(),
            width: self.viewport.width(),
        });

        let width = self.viewport.width();
        if width <= 0.0 {
            log::debug!("Regeneration suppressed: width {}", width);
            return;
        }
        let width_px = width as usize;
        if width_px == 0 {
            log::debug!("Regeneration suppressed: sub-pixel width {}", width);
            return;
        }

        let cancel = Arc::new(AtomicBool::new(false));
        self.generation += 1;

        let request = SummaryRequest {
            generation: self.generation,
            buffer: Arc::clone(&self.buffer),
            layout: self.viewport.layout(),
            range: self.viewport.range(),
            width: width_px,
            mode: self.mode,
            cancel: Arc::clone(&cancel),
        };

        match self.computer.submit(request) {
            Ok(()) => self.cancel = Some(cancel),
            Err(e) => log::error!("Failed to queue summary request: {}", e),
        }
    }
}
