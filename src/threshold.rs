//! Threshold validation, ranges and confidence filtering.

use crate::error::{MapEvalError, Result};
use crate::types::Detection;

/// Filter detections by a minimum confidence score.
///
/// # Arguments
///
/// * `detections` - Detections of one image
/// * `min_score` - Minimum confidence score (0.0 to 1.0)
///
/// # Returns
///
/// Returns a new vector containing only detections with score >= min_score.
///
/// # Errors
///
/// Returns an error if `min_score` is not in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use map_eval::threshold::filter_by_score;
/// use map_eval::types::{BoundingBox, Detection};
///
/// let detections = vec![
///     Detection::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0, 0.9),
///     Detection::new(BoundingBox::new(5.0, 5.0, 15.0, 15.0), 0, 0.3),
/// ];
///
/// let filtered = filter_by_score(&detections, 0.5).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter_by_score(detections: &[Detection], min_score: f64) -> Result<Vec<Detection>> {
    validate_threshold(min_score)?;

    Ok(detections
        .iter()
        .filter(|d| d.score >= min_score)
        .cloned()
        .collect())
}

/// Generate a range of threshold values.
///
/// # Arguments
///
/// * `start` - Starting threshold value (inclusive)
/// * `end` - Ending threshold value (inclusive)
/// * `steps` - Number of threshold values to generate
///
/// # Returns
///
/// Returns a vector of evenly-spaced threshold values.
///
/// # Example
///
/// ```
/// use map_eval::threshold::generate_threshold_range;
///
/// let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn generate_threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(MapEvalError::InvalidThreshold(
            "Number of steps must be greater than 0".to_string(),
        ));
    }

    validate_threshold(start)?;
    validate_threshold(end)?;

    if start > end {
        return Err(MapEvalError::InvalidThreshold(format!(
            "Start threshold ({}) must be <= end threshold ({})",
            start, end
        )));
    }

    if steps == 1 {
        return Ok(vec![start]);
    }

    // Index-based steps so the last level is exactly `end`.
    let span = end - start;
    let last = (steps - 1) as f64;
    Ok((0..steps)
        .map(|i| start + span * i as f64 / last)
        .collect())
}

/// Validate that a threshold is finite and in the range [0.0, 1.0].
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(MapEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_filter_by_score() {
        let detections = vec![
            Detection::new(BoundingBox::new(10.0, 20.0, 30.0, 40.0), 1, 0.9),
            Detection::new(BoundingBox::new(50.0, 60.0, 70.0, 80.0), 1, 0.3),
        ];

        let filtered = filter_by_score(&detections, 0.5).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].score, 0.9);
    }

    #[test]
    fn test_invalid_threshold() {
        let detections: Vec<Detection> = vec![];
        assert!(filter_by_score(&detections, 1.5).is_err());
        assert!(filter_by_score(&detections, -0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_generate_threshold_range() {
        let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
        assert_eq!(thresholds.len(), 11);
        assert_eq!(thresholds[0], 0.0);
        assert_eq!(thresholds[10], 1.0);
        assert!((thresholds[5] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_generate_threshold_range_errors() {
        assert!(generate_threshold_range(0.0, 1.0, 0).is_err());
        assert!(generate_threshold_range(0.8, 0.2, 5).is_err());
        assert_eq!(generate_threshold_range(0.3, 0.9, 1).unwrap(), vec![0.3]);
    }
}
