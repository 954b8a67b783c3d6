//! Common types for Crest
//!
//! This module contains the fundamental audio types used throughout the
//! crest waveform tools: the decoded multichannel sample buffer that the
//! reduction pipeline consumes, and the errors reported when one cannot
//! be constructed.

use thiserror::Error;

/// Audio sample type (32-bit float throughout the pipeline)
pub type Sample = f32;

/// Errors raised when a sample buffer cannot be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A buffer needs at least one channel
    #[error("Buffer must have at least one channel")]
    NoChannels,

    /// Interleaved data length must divide evenly into frames
    #[error("Interleaved length {len} is not a multiple of {channels} channels")]
    UnevenInterleave { len: usize, channels: usize },

    /// All channels must carry the same number of frames
    #[error("Channel length mismatch: expected {expected} frames, found {found}")]
    ChannelLengthMismatch { expected: usize, found: usize },
}

/// Result type for buffer construction
pub type BufferResult<T> = Result<T, BufferError>;

/// A decoded multichannel PCM buffer
///
/// Samples are stored interleaved (frame-major): frame `i` occupies
/// `data[i * channels .. (i + 1) * channels]`, so the per-frame stride
/// equals the channel count. The buffer is immutable once built and is
/// shared read-only across reduction workers via `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    data: Vec<Sample>,
    channels: usize,
    frames: usize,
}

impl SampleBuffer {
    /// Create a buffer from interleaved samples [c0, c1, ..., c0, c1, ...]
    pub fn from_interleaved(data: Vec<Sample>, channels: usize) -> BufferResult<Self> {
        if channels == 0 {
            return Err(BufferError::NoChannels);
        }
        if data.len() % channels != 0 {
            return Err(BufferError::UnevenInterleave {
                len: data.len(),
                channels,
            });
        }
        let frames = data.len() / channels;
        Ok(Self {
            data,
            channels,
            frames,
        })
    }

    /// Create a buffer from separate per-channel sample slices
    pub fn from_channels(channels: &[&[Sample]]) -> BufferResult<Self> {
        if channels.is_empty() {
            return Err(BufferError::NoChannels);
        }
        let frames = channels[0].len();
        for channel in &channels[1..] {
            if channel.len() != frames {
                return Err(BufferError::ChannelLengthMismatch {
                    expected: frames,
                    found: channel.len(),
                });
            }
        }
        let mut data = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            for channel in channels {
                data.push(channel[frame]);
            }
        }
        Ok(Self {
            data,
            channels: channels.len(),
            frames,
        })
    }

    /// Create a buffer filled with silence
    pub fn silence(frames: usize, channels: usize) -> Self {
        assert!(channels > 0, "Buffer must have at least one channel");
        Self {
            data: vec![0.0; frames * channels],
            channels,
            frames,
        }
    }

    /// Create a buffer filled with a constant value
    ///
    /// Useful for padding-boundary tests and placeholder displays.
    pub fn constant(frames: usize, channels: usize, value: Sample) -> Self {
        assert!(channels > 0, "Buffer must have at least one channel");
        Self {
            data: vec![value; frames * channels],
            channels,
            frames,
        }
    }

    /// Create a synthetic sine buffer (same phase on every channel)
    ///
    /// In-memory preview material for demos and tests; no file I/O.
    pub fn sine(frames: usize, channels: usize, period: usize) -> Self {
        assert!(channels > 0, "Buffer must have at least one channel");
        assert!(period > 0, "Sine period must be positive");
        let mut data = Vec::with_capacity(frames * channels);
        for frame in 0..frames {
            let phase = (frame % period) as f32 / period as f32;
            let value = (phase * std::f32::consts::TAU).sin();
            for _ in 0..channels {
                data.push(value);
            }
        }
        Self {
            data,
            channels,
            frames,
        }
    }

    /// Number of sample frames in the buffer
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of channels per frame
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Get one frame as a per-channel slice
    #[inline]
    pub fn frame(&self, index: usize) -> &[Sample] {
        let offset = index * self.channels;
        &self.data[offset..offset + self.channels]
    }

    /// Get a single sample by frame and channel index
    #[inline]
    pub fn sample(&self, frame: usize, channel: usize) -> Sample {
        self.data[frame * self.channels + channel]
    }

    /// Get the raw interleaved samples
    #[inline]
    pub fn as_interleaved(&self) -> &[Sample] {
        &self.data
    }

    /// Get the peak amplitude across all frames and channels
    pub fn peak(&self) -> Sample {
        self.data.iter().map(|s| s.abs()).fold(0.0, Sample::max)
    }
}
