//! Summary update events
//!
//! Explicit notification channel between the generator and its consumers.
//! A rendering layer subscribes and repaints on [`SummaryEvent::SummaryUpdated`]
//! instead of observing generator fields; a gesture layer can track
//! [`SummaryEvent::ViewportChanged`] to keep overlays in sync while a
//! reduction is still in flight.

use crate::reduce::RenderRange;
use crate::summary::DisplayMode;

/// Events published by a summary generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryEvent {
    /// The viewport mutated; a regeneration may be in flight
    ViewportChanged {
        /// The new render range
        range: RenderRange,
        /// The current pixel width
        width: f32,
    },

    /// A new summary sequence was applied and is readable on the generator
    SummaryUpdated {
        /// Generation counter of the applied summary
        generation: u64,
        /// Range the summary covers
        range: RenderRange,
        /// Pixel width of the summary
        width: usize,
        /// Display mode the summary was computed with
        mode: DisplayMode,
    },
}

/// Bounded event channel for generator notifications
///
/// Publishing never blocks: when no subscriber is draining the channel and
/// it fills up, further events are dropped. Consumers that care only about
/// the latest state re-read the generator after draining.
pub struct EventBus {
    sender: crossbeam::channel::Sender<SummaryEvent>,
    receiver: crossbeam::channel::Receiver<SummaryEvent>,
}

impl EventBus {
    /// Create a new event bus with bounded capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam::channel::bounded(capacity);
        Self { sender, receiver }
    }

    /// Get a receiver for subscribing to events
    pub fn subscribe(&self) -> crossbeam::channel::Receiver<SummaryEvent> {
        self.receiver.clone()
    }

    /// Publish an event without blocking; full channels drop the event
    pub fn publish(&self, event: SummaryEvent) {
        if let Err(crossbeam::channel::TrySendError::Full(event)) = self.sender.try_send(event) {
            log::debug!("Event bus full, dropping {:?}", event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
