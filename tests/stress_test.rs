//! Stress tests with large inputs and many classes.

use map_eval::evaluator::evaluate;
use map_eval::types::{BoundingBox, Detection, GroundTruth};

#[test]
fn test_1000_objects_single_image() {
    let mut detections = Vec::new();
    let mut ground_truths = Vec::new();

    for i in 0..1000 {
        let x = (i % 100) as f64 * 10.0;
        let y = (i / 100) as f64 * 10.0;
        let bbox = BoundingBox::new(x, y, x + 8.0, y + 8.0);
        ground_truths.push(GroundTruth::new(bbox, i % 5));
        detections.push(Detection::new(bbox, i % 5, 0.5 + (i % 50) as f64 / 100.0));
    }

    let result = evaluate(&[detections], &[ground_truths], 5, None).unwrap();

    assert!(result.map > 0.99, "mAP should be ~1.0 for perfect predictions, got {}", result.map);
    for stats in &result.class_stats {
        assert_eq!(stats.true_positives, 200);
        assert_eq!(stats.false_positives, 0);
    }
}

#[test]
fn test_many_images_half_detected() {
    let n_images = 500;
    let mut detections = Vec::with_capacity(n_images);
    let mut ground_truths = Vec::with_capacity(n_images);

    for image in 0..n_images {
        let bbox = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        ground_truths.push(vec![GroundTruth::new(bbox, 0)]);
        if image % 2 == 0 {
            detections.push(vec![Detection::new(bbox, 0, 0.9)]);
        } else {
            detections.push(vec![]);
        }
    }

    let result = evaluate(&detections, &ground_truths, 1, None).unwrap();

    // Recall tops out at 0.5 with precision 1: levels 0.0..=0.5
    assert!((result.map - 6.0 / 11.0).abs() < 1e-6, "got {}", result.map);
    assert_eq!(result.class_stats[0].missed(), 250);
}

#[test]
fn test_many_classes() {
    let n_classes = 200;
    let mut detections = Vec::new();
    let mut ground_truths = Vec::new();

    for class_id in 0..n_classes {
        let x = class_id as f64 * 30.0;
        let bbox = BoundingBox::new(x, 0.0, x + 25.0, 25.0);
        ground_truths.push(GroundTruth::new(bbox, class_id));
        // Even classes detected correctly, odd ones shifted off target
        let det_box = if class_id % 2 == 0 {
            bbox
        } else {
            BoundingBox::new(x + 20.0, 0.0, x + 45.0, 25.0)
        };
        detections.push(Detection::new(det_box, class_id, 0.8));
    }

    let result = evaluate(&[detections], &[ground_truths], n_classes, None).unwrap();

    assert_eq!(result.ap_per_class.len(), n_classes);
    assert!((result.map - 0.5).abs() < 1e-6, "got {}", result.map);
}

#[test]
fn test_crowded_duplicates() {
    // 100 detections piled on a single ground truth: one TP, 99 FP
    let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let detections: Vec<Detection> = (0..100)
        .map(|i| Detection::new(bbox, 0, 1.0 - i as f64 / 1000.0))
        .collect();

    let result = evaluate(&[detections], &[vec![GroundTruth::new(bbox, 0)]], 1, None).unwrap();

    assert_eq!(result.class_stats[0].true_positives, 1);
    assert_eq!(result.class_stats[0].false_positives, 99);
    assert!((result.map - 1.0).abs() < 1e-9);
}
