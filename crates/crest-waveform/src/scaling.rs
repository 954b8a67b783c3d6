//! Amplitude scaling for transient-highlight rendering
//!
//! Maps a bucket's amplitude and transient weight to the amplitude that is
//! actually painted. Non-transient material is attenuated hard so that
//! transient hits stand out; strongly weighted buckets keep (and visually
//! expand toward) their full amplitude.

/// Fraction of the amplitude kept for completely non-transient buckets
pub const NON_TRANSIENT_ATTENUATION: f32 = 0.15;

/// Exponent drive for transient expansion; weight 1 yields |a|^(1/2.5)
pub const TRANSIENT_EXPANSION_EXPONENT: f32 = 1.5;

/// Scale an amplitude for display by its transient weight
///
/// Sign-preserving. `weight` is expected in [0, 1]:
/// - weight 0 reduces the amplitude to exactly `amplitude * 0.15`
/// - weight 1 preserves full-scale input (`scale_amplitude(1.0, 1.0) == 1.0`)
/// - for a fixed nonzero amplitude the result grows monotonically in weight
#[inline]
pub fn scale_amplitude(amplitude: f32, weight: f32) -> f32 {
    let attenuation = NON_TRANSIENT_ATTENUATION + weight * (1.0 - NON_TRANSIENT_ATTENUATION);
    let scale_factor = 1.0 / (1.0 + weight * TRANSIENT_EXPANSION_EXPONENT);
    let scaled = amplitude.abs().powf(scale_factor) * attenuation;

    if amplitude >= 0.0 {
        scaled
    } else {
        -scaled
    }
}
