//! Flattening of per-image inputs into image-indexed tables.
//!
//! Both input forms (six parallel columns, or per-image records) end up as a
//! [`DetectionTable`] and a [`GroundTruthTable`] whose rows carry the index of
//! the image they came from. Only structure is validated here; box geometry
//! is passed through untouched.

use crate::error::{MapEvalError, Result};
use crate::types::{BoundingBox, ColumnarInput, Detection, GroundTruth};

/// All detections of an evaluation, one row per detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionTable {
    pub image_indices: Vec<usize>,
    pub boxes: Vec<BoundingBox>,
    pub labels: Vec<usize>,
    pub scores: Vec<f64>,
}

impl DetectionTable {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices of detections labelled `class_id`, in input order.
    pub fn class_rows(&self, class_id: usize) -> Vec<usize> {
        rows_with_label(&self.labels, class_id)
    }

    fn push(&mut self, image_index: usize, bbox: BoundingBox, label: usize, score: f64) {
        self.image_indices.push(image_index);
        self.boxes.push(bbox);
        self.labels.push(label);
        self.scores.push(score);
    }
}

/// All ground truths of an evaluation, one row per annotated object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruthTable {
    pub image_indices: Vec<usize>,
    pub boxes: Vec<BoundingBox>,
    pub labels: Vec<usize>,
    pub difficulties: Vec<bool>,
}

impl GroundTruthTable {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices of ground truths labelled `class_id`, in input order.
    pub fn class_rows(&self, class_id: usize) -> Vec<usize> {
        rows_with_label(&self.labels, class_id)
    }

    fn push(&mut self, image_index: usize, bbox: BoundingBox, label: usize, difficult: bool) {
        self.image_indices.push(image_index);
        self.boxes.push(bbox);
        self.labels.push(label);
        self.difficulties.push(difficult);
    }
}

/// Output of the aggregation step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatInput {
    pub n_images: usize,
    pub detections: DetectionTable,
    pub ground_truths: GroundTruthTable,
}

impl FlatInput {
    /// Labels present in either table that fall outside `0..n_classes`.
    pub fn out_of_range_labels(&self, n_classes: usize) -> Vec<usize> {
        let mut labels: Vec<usize> = self
            .detections
            .labels
            .iter()
            .chain(self.ground_truths.labels.iter())
            .copied()
            .filter(|&label| label >= n_classes)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

fn rows_with_label(labels: &[usize], class_id: usize) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label == class_id)
        .map(|(row, _)| row)
        .collect()
}

/// Flatten six parallel per-image columns.
///
/// # Errors
///
/// Returns [`MapEvalError::Validation`] if the columns disagree on the number
/// of images, or if within one image the detection (or ground truth) columns
/// disagree on the number of objects.
///
/// # Example
///
/// ```
/// use map_eval::aggregator::flatten_columns;
/// use map_eval::types::{BoundingBox, ColumnarInput};
///
/// let input = ColumnarInput {
///     det_boxes: vec![vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)], vec![]],
///     det_labels: vec![vec![1], vec![]],
///     det_scores: vec![vec![0.8], vec![]],
///     true_boxes: vec![vec![], vec![BoundingBox::new(0.0, 0.0, 5.0, 5.0)]],
///     true_labels: vec![vec![], vec![1]],
///     true_difficulties: vec![vec![], vec![false]],
/// };
/// let flat = flatten_columns(&input).unwrap();
/// assert_eq!(flat.n_images, 2);
/// assert_eq!(flat.ground_truths.image_indices, vec![1]);
/// ```
pub fn flatten_columns(input: &ColumnarInput) -> Result<FlatInput> {
    let n_images = input.det_boxes.len();
    let outer = [
        ("det_labels", input.det_labels.len()),
        ("det_scores", input.det_scores.len()),
        ("true_boxes", input.true_boxes.len()),
        ("true_labels", input.true_labels.len()),
        ("true_difficulties", input.true_difficulties.len()),
    ];
    for (name, len) in outer {
        if len != n_images {
            return Err(MapEvalError::Validation(format!(
                "{} covers {} images but det_boxes covers {}",
                name, len, n_images
            )));
        }
    }

    let mut flat = FlatInput {
        n_images,
        ..FlatInput::default()
    };

    for image in 0..n_images {
        let boxes = &input.det_boxes[image];
        let labels = &input.det_labels[image];
        let scores = &input.det_scores[image];
        if labels.len() != boxes.len() || scores.len() != boxes.len() {
            return Err(MapEvalError::Validation(format!(
                "image {}: {} detection boxes, {} labels, {} scores",
                image,
                boxes.len(),
                labels.len(),
                scores.len()
            )));
        }
        for ((bbox, &label), &score) in boxes.iter().zip(labels).zip(scores) {
            flat.detections.push(image, *bbox, label, score);
        }

        let boxes = &input.true_boxes[image];
        let labels = &input.true_labels[image];
        let difficulties = &input.true_difficulties[image];
        if labels.len() != boxes.len() || difficulties.len() != boxes.len() {
            return Err(MapEvalError::Validation(format!(
                "image {}: {} ground truth boxes, {} labels, {} difficulty flags",
                image,
                boxes.len(),
                labels.len(),
                difficulties.len()
            )));
        }
        for ((bbox, &label), &difficult) in boxes.iter().zip(labels).zip(difficulties) {
            flat.ground_truths.push(image, *bbox, label, difficult);
        }
    }

    Ok(flat)
}

/// Flatten per-image detection and ground truth records.
///
/// # Errors
///
/// Returns [`MapEvalError::Validation`] if the two sequences cover a
/// different number of images.
pub fn flatten_records(
    detections_per_image: &[Vec<Detection>],
    ground_truths_per_image: &[Vec<GroundTruth>],
) -> Result<FlatInput> {
    if detections_per_image.len() != ground_truths_per_image.len() {
        return Err(MapEvalError::Validation(format!(
            "detections cover {} images but ground truths cover {}",
            detections_per_image.len(),
            ground_truths_per_image.len()
        )));
    }

    let mut flat = FlatInput {
        n_images: detections_per_image.len(),
        ..FlatInput::default()
    };

    for (image, (detections, ground_truths)) in detections_per_image
        .iter()
        .zip(ground_truths_per_image)
        .enumerate()
    {
        for d in detections {
            flat.detections.push(image, d.bbox, d.label, d.score);
        }
        for g in ground_truths {
            flat.ground_truths.push(image, g.bbox, g.label, g.difficult);
        }
    }

    Ok(flat)
}
