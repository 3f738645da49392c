//! Greedy per-class matching of detections to ground truths.

use std::collections::HashMap;

use crate::aggregator::FlatInput;
use crate::metrics::iou::calculate_iou_matrix;
use crate::types::{BoundingBox, MatchOutcome};

/// Matching result for one class.
///
/// `outcomes[i]` and `scores[i]` describe the i-th detection of the class in
/// descending score order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMatches {
    pub class_id: usize,
    pub outcomes: Vec<MatchOutcome>,
    pub scores: Vec<f64>,
    /// Ground truths of this class, difficult ones included.
    pub n_ground_truths: usize,
    /// Non-difficult ground truths of this class; the recall denominator.
    pub n_easy: usize,
}

impl ClassMatches {
    pub fn true_positives(&self) -> usize {
        self.count(MatchOutcome::TruePositive)
    }

    pub fn false_positives(&self) -> usize {
        self.count(MatchOutcome::FalsePositive)
    }

    pub fn ignored(&self) -> usize {
        self.count(MatchOutcome::Ignored)
    }

    fn count(&self, outcome: MatchOutcome) -> usize {
        self.outcomes.iter().filter(|&&o| o == outcome).count()
    }
}

/// Sort detection rows by descending score.
///
/// The sort is stable, so equal scores keep their input order (image order,
/// then order within the image). Scores are compared with `total_cmp`, which
/// places NaN scores deterministically instead of panicking.
pub fn sort_by_score_desc(rows: &mut [usize], scores: &[f64]) {
    rows.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
}

/// Decide the outcome of one detection given its best overlap.
///
/// * `best` - Class-local index of the best overlapping ground truth and its IoU,
///   or `None` when the image has no ground truth of this class
/// * `difficulties` - Difficulty flags of the class's ground truths
/// * `matched` - Claim flags of the class's ground truths, updated on a true positive
pub fn classify_detection(
    best: Option<(usize, f64)>,
    iou_threshold: f64,
    difficulties: &[bool],
    matched: &mut [bool],
) -> MatchOutcome {
    match best {
        Some((gt, iou)) if iou > iou_threshold => {
            if difficulties[gt] {
                // Difficult objects absorb any number of detections.
                MatchOutcome::Ignored
            } else if !matched[gt] {
                matched[gt] = true;
                MatchOutcome::TruePositive
            } else {
                MatchOutcome::FalsePositive
            }
        }
        _ => MatchOutcome::FalsePositive,
    }
}

/// Match the detections of `class_id` against its ground truths.
///
/// Detections are visited in descending score order; each one is compared
/// with the ground truths of the same class in the same image and may claim
/// the one with the highest IoU if that IoU is strictly above
/// `iou_threshold` and nobody claimed it before. This is the greedy
/// assignment of the PASCAL VOC protocol, not an optimal one, and it must run
/// sequentially within a class.
///
/// # Arguments
///
/// * `input` - Flattened detections and ground truths of all images
/// * `class_id` - Class to evaluate
/// * `iou_threshold` - IoU cutoff for a match
///
/// # Returns
///
/// Returns the per-detection outcomes and the recall denominator.
pub fn match_class(input: &FlatInput, class_id: usize, iou_threshold: f64) -> ClassMatches {
    let dets = &input.detections;
    let gts = &input.ground_truths;

    let gt_rows = gts.class_rows(class_id);
    let difficulties: Vec<bool> = gt_rows.iter().map(|&row| gts.difficulties[row]).collect();
    let n_easy = difficulties.iter().filter(|&&d| !d).count();

    let mut det_rows = dets.class_rows(class_id);
    sort_by_score_desc(&mut det_rows, &dets.scores);

    // image index -> class-local ground truth indices and their boxes
    let mut gts_by_image: HashMap<usize, (Vec<usize>, Vec<BoundingBox>)> = HashMap::new();
    for (local, &row) in gt_rows.iter().enumerate() {
        let (locals, boxes) = gts_by_image.entry(gts.image_indices[row]).or_default();
        locals.push(local);
        boxes.push(gts.boxes[row]);
    }

    let mut matched = vec![false; gt_rows.len()];
    let mut outcomes = Vec::with_capacity(det_rows.len());

    for &row in &det_rows {
        let best = gts_by_image
            .get(&dets.image_indices[row])
            .and_then(|(locals, boxes)| {
                let det_box = std::slice::from_ref(&dets.boxes[row]);
                let overlaps = calculate_iou_matrix(det_box, boxes);
                overlaps[0]
                    .iter()
                    .zip(locals)
                    // first candidate wins ties
                    .fold(None, |best: Option<(usize, f64)>, (&iou, &local)| match best {
                        Some((_, best_iou)) if best_iou >= iou => best,
                        _ => Some((local, iou)),
                    })
            });

        outcomes.push(classify_detection(
            best,
            iou_threshold,
            &difficulties,
            &mut matched,
        ));
    }

    ClassMatches {
        class_id,
        outcomes,
        scores: det_rows.iter().map(|&row| dets.scores[row]).collect(),
        n_ground_truths: gt_rows.len(),
        n_easy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::flatten_records;
    use crate::types::{Detection, GroundTruth};

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2)
    }

    fn flat(detections: Vec<Vec<Detection>>, ground_truths: Vec<Vec<GroundTruth>>) -> FlatInput {
        flatten_records(&detections, &ground_truths).unwrap()
    }

    #[test]
    fn test_perfect_match() {
        let input = flat(
            vec![vec![Detection::new(bbox(10.0, 10.0, 60.0, 60.0), 1, 0.9)]],
            vec![vec![GroundTruth::new(bbox(10.0, 10.0, 60.0, 60.0), 1)]],
        );

        let matches = match_class(&input, 1, 0.5);
        assert_eq!(matches.outcomes, vec![MatchOutcome::TruePositive]);
        assert_eq!(matches.n_easy, 1);
    }

    #[test]
    fn test_no_match() {
        let input = flat(
            vec![vec![Detection::new(bbox(10.0, 10.0, 60.0, 60.0), 1, 0.9)]],
            vec![vec![GroundTruth::new(bbox(200.0, 200.0, 250.0, 250.0), 1)]],
        );

        let matches = match_class(&input, 1, 0.5);
        assert_eq!(matches.outcomes, vec![MatchOutcome::FalsePositive]);
    }

    #[test]
    fn test_confidence_sorting() {
        let input = flat(
            vec![vec![
                Detection::new(bbox(10.0, 10.0, 60.0, 60.0), 1, 0.5),
                Detection::new(bbox(20.0, 20.0, 70.0, 70.0), 1, 0.9),
                Detection::new(bbox(21.0, 21.0, 70.0, 70.0), 1, 0.7),
            ]],
            vec![vec![GroundTruth::new(bbox(20.0, 20.0, 70.0, 70.0), 1)]],
        );

        let matches = match_class(&input, 1, 0.5);
        assert_eq!(matches.scores, vec![0.9, 0.7, 0.5]);

        // Only the highest confidence prediction claims the ground truth
        assert_eq!(
            matches.outcomes,
            vec![
                MatchOutcome::TruePositive,
                MatchOutcome::FalsePositive,
                MatchOutcome::FalsePositive,
            ]
        );
    }

    #[test]
    fn test_other_image_is_false_positive() {
        let input = flat(
            vec![vec![], vec![Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.8)]],
            vec![vec![GroundTruth::new(bbox(0.0, 0.0, 10.0, 10.0), 0)], vec![]],
        );

        let matches = match_class(&input, 0, 0.5);
        assert_eq!(matches.outcomes, vec![MatchOutcome::FalsePositive]);
        assert_eq!(matches.true_positives(), 0);
    }

    #[test]
    fn test_other_class_is_not_a_candidate() {
        let input = flat(
            vec![vec![Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.8)]],
            vec![vec![GroundTruth::new(bbox(0.0, 0.0, 10.0, 10.0), 1)]],
        );

        assert_eq!(match_class(&input, 0, 0.5).false_positives(), 1);
        let other = match_class(&input, 1, 0.5);
        assert!(other.outcomes.is_empty());
        assert_eq!(other.n_easy, 1);
    }

    #[test]
    fn test_difficult_absorbs_repeatedly() {
        let input = flat(
            vec![vec![
                Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.9),
                Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.8),
            ]],
            vec![vec![GroundTruth::difficult(bbox(0.0, 0.0, 10.0, 10.0), 0)]],
        );

        let matches = match_class(&input, 0, 0.5);
        assert_eq!(matches.ignored(), 2);
        assert_eq!(matches.n_easy, 0);
        assert_eq!(matches.n_ground_truths, 1);
    }

    #[test]
    fn test_best_overlap_already_claimed_is_false_positive() {
        // The second detection overlaps the claimed box best, even though a
        // free box also clears the threshold.
        let input = flat(
            vec![vec![
                Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.9),
                Detection::new(bbox(1.0, 0.0, 11.0, 10.0), 0, 0.8),
            ]],
            vec![vec![
                GroundTruth::new(bbox(0.0, 0.0, 10.0, 10.0), 0),
                GroundTruth::new(bbox(2.5, 0.0, 12.5, 10.0), 0),
            ]],
        );

        let matches = match_class(&input, 0, 0.5);
        assert_eq!(
            matches.outcomes,
            vec![MatchOutcome::TruePositive, MatchOutcome::FalsePositive]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        // IoU exactly 0.5: 10x10 box against a 10x20 box containing it
        let input = flat(
            vec![vec![Detection::new(bbox(0.0, 0.0, 10.0, 10.0), 0, 0.9)]],
            vec![vec![GroundTruth::new(bbox(0.0, 0.0, 10.0, 20.0), 0)]],
        );

        assert_eq!(match_class(&input, 0, 0.5).false_positives(), 1);
        assert_eq!(match_class(&input, 0, 0.49).true_positives(), 1);
    }

    #[test]
    fn test_stable_tie_break() {
        let mut rows = vec![0, 1, 2, 3];
        let scores = [0.5, 0.9, 0.5, 0.9];
        sort_by_score_desc(&mut rows, &scores);
        assert_eq!(rows, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_classify_detection_states() {
        let difficulties = [false, true];
        let mut matched = [false, false];

        assert_eq!(
            classify_detection(Some((0, 0.8)), 0.5, &difficulties, &mut matched),
            MatchOutcome::TruePositive
        );
        assert!(matched[0]);
        assert_eq!(
            classify_detection(Some((0, 0.8)), 0.5, &difficulties, &mut matched),
            MatchOutcome::FalsePositive
        );
        assert_eq!(
            classify_detection(Some((1, 0.8)), 0.5, &difficulties, &mut matched),
            MatchOutcome::Ignored
        );
        assert!(!matched[1]);
        assert_eq!(
            classify_detection(Some((1, 0.2)), 0.5, &difficulties, &mut matched),
            MatchOutcome::FalsePositive
        );
        assert_eq!(
            classify_detection(None, 0.5, &difficulties, &mut matched),
            MatchOutcome::FalsePositive
        );
    }
}
