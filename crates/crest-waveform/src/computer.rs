//! Background summary computation
//!
//! Runs bucket reduction off the coordination context so viewport changes
//! never block on a scan of a long buffer. One dedicated thread receives
//! requests and fans the per-bucket work out across the rayon pool.
//!
//! ## Design
//!
//! 1. The generator submits a [`SummaryRequest`] carrying the buffer,
//!    geometry, and a cancel flag it retains.
//! 2. The thread skips requests whose flag is already set (superseded
//!    while queued) and runs [`reduce`] for the rest.
//! 3. Cancelled and degenerate runs deliver nothing; completed runs are
//!    sent back and collected by the generator via [`SummaryComputer::try_recv`].
//!
//! A request's generation number travels with its result so the consumer
//! can discard a delivery that raced with a newer request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crest_core::SampleBuffer;

use crate::reduce::{reduce, RenderRange, VirtualLayout};
use crate::summary::{DisplayMode, SampleData};

/// Request to reduce one viewport's range to a summary sequence
pub struct SummaryRequest {
    /// Monotonic counter identifying the request; echoed in the result
    pub generation: u64,
    /// Decoded sample buffer, shared read-only with the owner
    pub buffer: Arc<SampleBuffer>,
    /// Placement of the buffer in virtual sample space
    pub layout: VirtualLayout,
    /// Visible window to reduce
    pub range: RenderRange,
    /// Target pixel width
    pub width: usize,
    /// Whether to run the transient pass
    pub mode: DisplayMode,
    /// Cooperative cancel flag; the owner sets it to supersede this run
    pub cancel: Arc<AtomicBool>,
}

impl std::fmt::Debug for SummaryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryRequest")
            .field("generation", &self.generation)
            .field(
                "buffer",
                &format_args!(
                    "<SampleBuffer {} frames x {} ch>",
                    self.buffer.frames(),
                    self.buffer.channels()
                ),
            )
            .field("layout", &self.layout)
            .field("range", &self.range)
            .field("width", &self.width)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Completed summary computation
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// Generation of the request that produced this summary
    pub generation: u64,
    /// One entry per pixel column
    pub summary: Vec<SampleData>,
    /// Range the summary was computed for
    pub range: RenderRange,
    /// Pixel width used
    pub width: usize,
    /// Display mode used
    pub mode: DisplayMode,
}

/// Background thread for summary reduction
///
/// Requests queue in submission order; a superseded request is dropped
/// when dequeued, so at most the latest request per owner produces a
/// delivery.
pub struct SummaryComputer {
    /// Channel to send reduction requests
    tx: Sender<SummaryRequest>,
    /// Channel to receive completed summaries
    rx: Receiver<SummaryResult>,
    /// Thread handle (detaches on drop)
    _handle: JoinHandle<()>,
}

impl SummaryComputer {
    /// Spawn the background reduction thread
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<SummaryRequest>();
        let (result_tx, result_rx) = std::sync::mpsc::channel::<SummaryResult>();

        let handle = thread::Builder::new()
            .name("summary-computer".to_string())
            .spawn(move || {
                computer_thread(request_rx, result_tx);
            })
            .expect("Failed to spawn summary computer thread");

        log::info!("SummaryComputer background thread started");

        Self {
            tx: request_tx,
            rx: result_rx,
            _handle: handle,
        }
    }

    /// Submit a reduction request (non-blocking)
    pub fn submit(&self, request: SummaryRequest) -> Result<(), String> {
        self.tx
            .send(request)
            .map_err(|e| format!("Summary computer thread disconnected: {}", e))
    }

    /// Try to receive a completed summary (non-blocking)
    ///
    /// Call from the coordination context to drain finished work.
    pub fn try_recv(&self) -> Option<SummaryResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Summary computer thread disconnected unexpectedly");
                None
            }
        }
    }
}

/// The background reduction thread
fn computer_thread(rx: Receiver<SummaryRequest>, tx: Sender<SummaryResult>) {
    log::debug!("Summary computer thread starting");

    while let Ok(request) = rx.recv() {
        // Superseded while waiting in the queue
        if request.cancel.load(Ordering::Relaxed) {
            log::debug!(
                "Skipping superseded request generation={}",
                request.generation
            );
            continue;
        }

        let started = std::time::Instant::now();
        let reduced = reduce(
            &request.buffer,
            request.layout,
            request.range,
            request.width,
            request.mode,
            &request.cancel,
        );

        match reduced {
            Some(summary) => {
                log::debug!(
                    "Summary generation={} computed in {:?} ({}..{}, {} columns)",
                    request.generation,
                    started.elapsed(),
                    request.range.start,
                    request.range.end,
                    summary.len()
                );
                let _ = tx.send(SummaryResult {
                    generation: request.generation,
                    summary,
                    range: request.range,
                    width: request.width,
                    mode: request.mode,
                });
            }
            // Cancelled mid-run or degenerate geometry: nothing delivered
            None => {
                log::debug!(
                    "Summary generation={} produced no delivery",
                    request.generation
                );
            }
        }
    }

    log::debug!("Summary computer thread shutting down");
}
