//! Waveform summary pipeline for crest audio tools
//!
//! This crate reduces decoded PCM buffers to renderable per-pixel summary
//! sequences and tracks the viewport state that maps screen positions to
//! sample indices.
//!
//! ## Architecture
//!
//! - **Value types**: [`SampleData`] entries, one per pixel column
//! - **Reduction**: parallel, cancelable min/max bucketing over a padded
//!   virtual sample space ([`reduce`])
//! - **Background computation**: a dedicated thread so viewport changes
//!   never block the coordination context ([`SummaryComputer`])
//! - **Viewport**: zoom/pan/padding arithmetic and coordinate conversion
//!   ([`Viewport`])
//! - **Orchestration**: [`SummaryGenerator`] cancels superseded work,
//!   applies deliveries, and publishes update events
//!
//! Rendering is left to the host: read [`SummaryGenerator::summary`] and
//! apply [`scale_amplitude`] per entry at paint time when the display mode
//! is [`DisplayMode::TransientHighlight`].

pub mod computer;
pub mod events;
pub mod generator;
pub mod reduce;
pub mod scaling;
pub mod summary;
pub mod transient;
pub mod viewport;

// Value types
pub use summary::{DisplayMode, SampleData};

// Reduction over virtual sample space
pub use reduce::{reduce, RenderRange, VirtualLayout};

// Transient scoring and paint-time scaling
pub use scaling::{scale_amplitude, NON_TRANSIENT_ATTENUATION, TRANSIENT_EXPANSION_EXPONENT};
pub use transient::{compute_transient_weights, DERIVATIVE_FLOOR};

// Background computation
pub use computer::{SummaryComputer, SummaryRequest, SummaryResult};

// Viewport state and orchestration
pub use events::{EventBus, SummaryEvent};
pub use generator::SummaryGenerator;
pub use viewport::Viewport;
