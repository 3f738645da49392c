//! Average Precision (AP) and mean Average Precision (mAP) calculation.

use crate::metrics::precision_recall::{eleven_point_recall_levels, interpolate_precision};
use crate::types::PrecisionRecallPoint;

/// Calculate Average Precision (AP) from a precision-recall curve.
///
/// Uses the PASCAL VOC 11-point interpolation method.
///
/// # Arguments
///
/// * `curve` - Cumulative precision-recall points of one class
///
/// # Returns
///
/// Returns the Average Precision value (0.0 to 1.0), 0.0 for an empty curve.
///
/// # Example
///
/// ```
/// use map_eval::metrics::ap::calculate_ap;
/// use map_eval::types::PrecisionRecallPoint;
///
/// let curve = vec![PrecisionRecallPoint { precision: 1.0, recall: 1.0, score: 0.9 }];
/// assert!((calculate_ap(&curve) - 1.0).abs() < 1e-10);
/// ```
pub fn calculate_ap(curve: &[PrecisionRecallPoint]) -> f64 {
    if curve.is_empty() {
        return 0.0;
    }

    let interpolated = interpolate_precision(curve, &eleven_point_recall_levels());

    // Average over all 11 recall levels
    interpolated.iter().sum::<f64>() / interpolated.len() as f64
}

/// Calculate mean Average Precision (mAP) across multiple classes.
///
/// # Arguments
///
/// * `class_aps` - AP values for each class
///
/// # Returns
///
/// Returns the mean Average Precision (0.0 to 1.0).
///
/// # Example
///
/// ```
/// use map_eval::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps);
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> f64 {
    if class_aps.is_empty() {
        return 0.0;
    }

    class_aps.iter().sum::<f64>() / class_aps.len() as f64
}
