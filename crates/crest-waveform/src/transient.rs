//! Transient weight computation
//!
//! Scores each summary bucket by how abruptly the peak amplitude changed
//! relative to its neighbor, normalized over the whole sequence. The
//! weights drive the transient-highlight amplitude curve at paint time.

use crate::summary::SampleData;

/// Derivatives at or below this value are treated as silence/constant
/// signal; normalizing by them would amplify noise into full-scale weights.
pub const DERIVATIVE_FLOOR: f32 = 0.001;

/// Fill in `transient_weight` for every entry of a summary sequence
///
/// Weights are the square root of each bucket's peak derivative normalized
/// by the sequence maximum, so moderate transients still register visually.
/// Sequences of length 0 or 1 are left untouched, as is any sequence whose
/// maximum derivative does not exceed [`DERIVATIVE_FLOOR`].
///
/// The first bucket has no predecessor; its derivative mirrors the second
/// bucket's rather than defaulting to a spurious zero.
///
/// Guarantees: all weights in [0, 1], and at least one weight of exactly
/// 1.0 whenever the floor is exceeded.
pub fn compute_transient_weights(summary: &mut [SampleData]) {
    if summary.len() <= 1 {
        return;
    }

    let peaks: Vec<f32> = summary.iter().map(|data| data.peak()).collect();

    let mut derivatives = vec![0.0f32; peaks.len()];
    for i in 1..peaks.len() {
        derivatives[i] = (peaks[i] - peaks[i - 1]).abs();
    }
    derivatives[0] = derivatives[1];

    let max_derivative = derivatives.iter().copied().fold(0.0f32, f32::max);
    if max_derivative <= DERIVATIVE_FLOOR {
        return;
    }

    for (data, derivative) in summary.iter_mut().zip(&derivatives) {
        data.transient_weight = (derivative / max_derivative).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_from_peaks(peaks: &[f32]) -> Vec<SampleData> {
        peaks.iter().map(|&p| SampleData::new(-p, p)).collect()
    }

    #[test]
    fn test_empty_and_single_untouched() {
        let mut empty: Vec<SampleData> = Vec::new();
        compute_transient_weights(&mut empty);

        let mut single = summary_from_peaks(&[0.9]);
        compute_transient_weights(&mut single);
        assert_eq!(single[0].transient_weight, 0.0);
    }

    #[test]
    fn test_constant_signal_stays_zero() {
        let mut summary = summary_from_peaks(&[0.5; 32]);
        compute_transient_weights(&mut summary);
        assert!(summary.iter().all(|d| d.transient_weight == 0.0));
    }

    #[test]
    fn test_near_silent_derivatives_stay_zero() {
        // Max derivative stays under the floor; must not normalize
        let mut summary = summary_from_peaks(&[0.5, 0.5004, 0.5002]);
        compute_transient_weights(&mut summary);
        assert!(summary.iter().all(|d| d.transient_weight == 0.0));
    }

    #[test]
    fn test_weights_normalized_to_unit_max() {
        let mut summary = summary_from_peaks(&[0.0, 0.1, 0.9, 0.85, 0.2]);
        compute_transient_weights(&mut summary);

        let max_weight = summary
            .iter()
            .map(|d| d.transient_weight)
            .fold(0.0f32, f32::max);
        assert_eq!(max_weight, 1.0);
        assert!(summary
            .iter()
            .all(|d| (0.0..=1.0).contains(&d.transient_weight)));

        // 0.1 -> 0.9 is the steepest step, so bucket 2 carries the max
        assert_eq!(summary[2].transient_weight, 1.0);
    }

    #[test]
    fn test_first_bucket_mirrors_second() {
        let mut summary = summary_from_peaks(&[0.9, 0.1, 0.5, 0.45]);
        compute_transient_weights(&mut summary);
        assert_eq!(summary[0].transient_weight, summary[1].transient_weight);
    }

    #[test]
    fn test_square_root_compresses_toward_one() {
        // Derivative ratio 0.25 should land at weight 0.5, not 0.25
        let mut summary = summary_from_peaks(&[0.0, 0.2, 0.2, 1.0]);
        compute_transient_weights(&mut summary);
        assert!((summary[1].transient_weight - 0.5).abs() < 1e-6);
    }
}
