//! Main evaluation orchestrator for mAP.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregator::{flatten_columns, flatten_records, FlatInput};
use crate::config::EvalConfig;
use crate::error::Result;
use crate::matching::match_class;
use crate::metrics::ap::{calculate_ap, calculate_map};
use crate::metrics::precision_recall::calculate_precision_recall_curve;
use crate::stats::ClassStats;
use crate::types::{
    ColumnarInput, Detection, EvaluationInput, GroundTruth, MapResult, PrecisionRecallPoint,
};

/// Evaluate per-image detections against per-image ground truths.
///
/// # Arguments
///
/// * `detections_per_image` - Detections of each image
/// * `ground_truths_per_image` - Ground truths of each image, same image order
/// * `n_classes` - Classes `0..n_classes` are evaluated
/// * `iou_threshold` - IoU cutoff for a match (default: 0.5)
///
/// # Returns
///
/// Returns the AP of every class and their mean.
///
/// # Errors
///
/// Returns a validation error if the two sequences cover a different number
/// of images, or an invalid threshold error for a threshold outside [0, 1].
///
/// # Example
///
/// ```
/// use map_eval::evaluator::evaluate;
/// use map_eval::types::{BoundingBox, Detection, GroundTruth};
///
/// let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
/// let detections = vec![vec![Detection::new(bbox, 0, 1.0)]];
/// let ground_truths = vec![vec![GroundTruth::new(bbox, 0)]];
///
/// let result = evaluate(&detections, &ground_truths, 1, None).unwrap();
/// assert!((result.map - 1.0).abs() < 1e-9);
/// ```
pub fn evaluate(
    detections_per_image: &[Vec<Detection>],
    ground_truths_per_image: &[Vec<GroundTruth>],
    n_classes: usize,
    iou_threshold: Option<f64>,
) -> Result<MapResult> {
    let mut config = EvalConfig::default();
    if let Some(threshold) = iou_threshold {
        config.iou_threshold = threshold;
    }
    config.validate()?;

    let flat = flatten_records(detections_per_image, ground_truths_per_image)?;
    evaluate_flat(&flat, n_classes, &config)
}

/// Evaluate six parallel per-image columns.
///
/// # Errors
///
/// Returns a validation error if the columns disagree on the number of images
/// or on the number of objects within an image.
pub fn evaluate_columns(
    input: &ColumnarInput,
    n_classes: usize,
    config: &EvalConfig,
) -> Result<MapResult> {
    config.validate()?;
    let flat = flatten_columns(input)?;
    evaluate_flat(&flat, n_classes, config)
}

/// Evaluate a loaded input document.
pub fn evaluate_input(input: &EvaluationInput, config: &EvalConfig) -> Result<MapResult> {
    evaluate_columns(&input.columns, input.n_classes, config)
}

/// Evaluate already flattened tables.
///
/// Every class in `0..n_classes` is evaluated independently, on the rayon
/// pool when `config.parallel` is set; the result is identical either way.
/// Labels outside that range take part in no class pass.
pub fn evaluate_flat(flat: &FlatInput, n_classes: usize, config: &EvalConfig) -> Result<MapResult> {
    config.validate()?;

    if let Some(device) = &config.device {
        debug!(device = %device, "compute target hint ignored");
    }

    let stray = flat.out_of_range_labels(n_classes);
    if !stray.is_empty() {
        warn!(
            n_classes,
            labels = ?stray,
            "labels outside the class range are not evaluated"
        );
    }

    let threshold = config.iou_threshold;
    let class_stats: Vec<ClassStats> = if config.parallel {
        (0..n_classes)
            .into_par_iter()
            .map(|class_id| evaluate_class(flat, class_id, threshold))
            .collect()
    } else {
        (0..n_classes)
            .map(|class_id| evaluate_class(flat, class_id, threshold))
            .collect()
    };

    let ap_per_class: BTreeMap<usize, f64> =
        class_stats.iter().map(|s| (s.class_id, s.ap)).collect();
    let aps: Vec<f64> = class_stats.iter().map(|s| s.ap).collect();
    let map = calculate_map(&aps);

    info!(
        n_images = flat.n_images,
        n_classes,
        detections = flat.detections.len(),
        ground_truths = flat.ground_truths.len(),
        iou_threshold = threshold,
        map,
        "evaluation finished"
    );

    Ok(MapResult {
        ap_per_class,
        map,
        class_stats,
    })
}

/// Evaluate a single class at a specific IoU threshold.
///
/// This is an independent sweep for one class: its claim flags are created
/// here and dropped on return.
pub fn evaluate_class(flat: &FlatInput, class_id: usize, iou_threshold: f64) -> ClassStats {
    let matches = match_class(flat, class_id, iou_threshold);
    let curve = calculate_precision_recall_curve(&matches.outcomes, &matches.scores, matches.n_easy);
    let stats = ClassStats::from_matches(&matches, calculate_ap(&curve));
    stats.log_summary();
    stats
}

/// Cumulative precision-recall curve of one class, one point per detection in
/// descending score order.
pub fn precision_recall_curve_for_class(
    flat: &FlatInput,
    class_id: usize,
    iou_threshold: f64,
) -> Vec<PrecisionRecallPoint> {
    let matches = match_class(flat, class_id, iou_threshold);
    calculate_precision_recall_curve(&matches.outcomes, &matches.scores, matches.n_easy)
}
