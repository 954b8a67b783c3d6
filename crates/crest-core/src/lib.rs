//! Crest Core - shared sample types and configuration for waveform tooling

pub mod config;
pub mod types;

pub use types::*;
