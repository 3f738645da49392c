//! Core data types for detections, ground truths and evaluation results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::ClassStats;

/// Represents an axis-aligned bounding box in corner format (x1, y1, x2, y2).
///
/// Coordinates are in XYXY (two-corner) format where:
/// - x1, y1: Top-left corner
/// - x2, y2: Bottom-right corner
///
/// Inverted boxes (`x1 > x2` or `y1 > y2`) are representable and treated as
/// having zero area. In JSON a box is the array `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its two corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the box, clamped to zero for inverted boxes.
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Height of the box, clamped to zero for inverted boxes.
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if the bounding box is valid (positive dimensions).
    pub fn is_valid(&self) -> bool {
        self.x2 > self.x1 && self.y2 > self.y1
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A single predicted object within one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: usize,
    pub score: f64,
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: usize, score: f64) -> Self {
        Self { bbox, label, score }
    }
}

/// A single annotated object within one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub bbox: BoundingBox,
    pub label: usize,
    /// Difficult objects are excluded from the recall denominator and
    /// absorb matching detections without producing false positives.
    #[serde(default)]
    pub difficult: bool,
}

impl GroundTruth {
    pub fn new(bbox: BoundingBox, label: usize) -> Self {
        Self {
            bbox,
            label,
            difficult: false,
        }
    }

    pub fn difficult(bbox: BoundingBox, label: usize) -> Self {
        Self {
            bbox,
            label,
            difficult: true,
        }
    }
}

/// Six parallel per-image columns, one entry per image in each.
///
/// `det_boxes[i]`, `det_labels[i]` and `det_scores[i]` describe the detections
/// of image `i`; `true_boxes[i]`, `true_labels[i]` and `true_difficulties[i]`
/// describe its annotations. Detections and ground truths of one image are
/// sized independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarInput {
    pub det_boxes: Vec<Vec<BoundingBox>>,
    pub det_labels: Vec<Vec<usize>>,
    pub det_scores: Vec<Vec<f64>>,
    pub true_boxes: Vec<Vec<BoundingBox>>,
    pub true_labels: Vec<Vec<usize>>,
    pub true_difficulties: Vec<Vec<bool>>,
}

/// A columnar input document together with its class count, as read by
/// [`crate::loader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub n_classes: usize,
    #[serde(flatten)]
    pub columns: ColumnarInput,
}

/// Classification of one detection by the per-class matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Claimed an unmatched, non-difficult ground truth.
    TruePositive,
    /// No overlap above the threshold, or the best ground truth was taken.
    FalsePositive,
    /// Best overlap was a difficult ground truth; counts as neither.
    Ignored,
}

/// Precision-Recall curve point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecisionRecallPoint {
    pub precision: f64,
    pub recall: f64,
    /// Confidence of the detection at which this point was reached.
    pub score: f64,
}

/// Result of one evaluation call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapResult {
    /// AP for every class id in `0..n_classes`.
    pub ap_per_class: BTreeMap<usize, f64>,
    /// Arithmetic mean of `ap_per_class`.
    pub map: f64,
    /// Matching counters per class, in class order.
    pub class_stats: Vec<ClassStats>,
}

impl MapResult {
    /// AP of a single class, `None` when the id is outside `0..n_classes`.
    pub fn ap(&self, class_id: usize) -> Option<f64> {
        self.ap_per_class.get(&class_id).copied()
    }
}
