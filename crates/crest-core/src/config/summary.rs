//! Summary display configuration
//!
//! Host-facing defaults for waveform summary generation. Hosts persist
//! this alongside their own settings via the generic YAML loader.

use serde::{Deserialize, Serialize};

/// Configuration for waveform summary generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Pixel width used when a host has no measured layout yet
    /// Default: 800
    pub default_width: usize,

    /// Start new views in transient-highlight display mode
    /// Default: false (plain min/max rendering)
    pub transient_highlight: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_width: 800,
            transient_highlight: false,
        }
    }
}
