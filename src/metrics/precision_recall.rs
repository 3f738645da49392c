//! Cumulative precision-recall curves and 11-point interpolation.

use crate::types::{MatchOutcome, PrecisionRecallPoint};

/// Added to the precision denominator so that a prefix made only of ignored
/// detections yields precision 0 rather than NaN.
pub const PRECISION_EPSILON: f64 = 1e-10;

/// Number of recall levels used by the PASCAL VOC 2007 interpolation.
pub const RECALL_LEVELS: usize = 11;

/// Build the cumulative precision-recall curve of one class.
///
/// # Arguments
///
/// * `outcomes` - Match outcomes in descending score order
/// * `scores` - Scores aligned with `outcomes`
/// * `n_easy` - Number of non-difficult ground truths (recall denominator)
///
/// # Returns
///
/// Returns one point per detection. Ignored detections add to neither
/// cumulative count. Recall is 0 when `n_easy` is 0.
///
/// # Example
///
/// ```
/// use map_eval::metrics::precision_recall::calculate_precision_recall_curve;
/// use map_eval::types::MatchOutcome::{FalsePositive, TruePositive};
///
/// let curve = calculate_precision_recall_curve(&[TruePositive, FalsePositive], &[0.9, 0.8], 2);
/// assert!((curve[0].precision - 1.0).abs() < 1e-9);
/// assert!((curve[1].precision - 0.5).abs() < 1e-9);
/// assert_eq!(curve[1].recall, 0.5);
/// ```
pub fn calculate_precision_recall_curve(
    outcomes: &[MatchOutcome],
    scores: &[f64],
    n_easy: usize,
) -> Vec<PrecisionRecallPoint> {
    let mut tp = 0usize;
    let mut fp = 0usize;

    outcomes
        .iter()
        .zip(scores)
        .map(|(&outcome, &score)| {
            match outcome {
                MatchOutcome::TruePositive => tp += 1,
                MatchOutcome::FalsePositive => fp += 1,
                MatchOutcome::Ignored => {}
            }

            let precision = tp as f64 / (tp as f64 + fp as f64 + PRECISION_EPSILON);
            let recall = if n_easy > 0 {
                tp as f64 / n_easy as f64
            } else {
                0.0
            };

            PrecisionRecallPoint {
                precision,
                recall,
                score,
            }
        })
        .collect()
}

/// Interpolate precision at the given recall levels.
///
/// The interpolated precision at level `t` is the maximum precision over all
/// points whose recall is at least `t`, or 0 if no point reaches `t`.
///
/// # Arguments
///
/// * `curve` - Precision-recall points in any order
/// * `recall_levels` - Recall levels to sample
///
/// # Returns
///
/// Returns one interpolated precision per recall level.
pub fn interpolate_precision(curve: &[PrecisionRecallPoint], recall_levels: &[f64]) -> Vec<f64> {
    recall_levels
        .iter()
        .map(|&level| {
            curve
                .iter()
                .filter(|point| point.recall >= level)
                .map(|point| point.precision)
                .fold(0.0f64, f64::max)
        })
        .collect()
}

/// The 11 recall levels `0.0, 0.1, ..., 1.0`.
pub fn eleven_point_recall_levels() -> Vec<f64> {
    (0..RECALL_LEVELS)
        .map(|i| i as f64 / (RECALL_LEVELS - 1) as f64)
        .collect()
}
