//! Sweep the IoU threshold and report mAP at each level.

use map_eval::aggregator::flatten_records;
use map_eval::evaluator::evaluate_flat;
use map_eval::threshold::generate_threshold_range;
use map_eval::{BoundingBox, Detection, EvalConfig, GroundTruth};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("map_eval=info")),
        )
        .init();

    println!("=== IoU Threshold Sweep ===\n");

    // Detections drift further from their targets as the index grows
    let mut detections = Vec::new();
    let mut ground_truths = Vec::new();
    for image in 0..20 {
        let shift = image as f64 * 1.5;
        let gt_box = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        let det_box = BoundingBox::new(50.0 + shift, 50.0, 100.0 + shift, 100.0);
        ground_truths.push(vec![GroundTruth::new(gt_box, image % 3)]);
        detections.push(vec![Detection::new(det_box, image % 3, 0.99 - image as f64 * 0.01)]);
    }

    let flat = flatten_records(&detections, &ground_truths)?;

    println!("{:>10} {:>10}", "IoU >", "mAP");
    println!("{}", "-".repeat(21));
    for threshold in generate_threshold_range(0.5, 0.95, 10)? {
        let config = EvalConfig::new().with_iou_threshold(threshold);
        let result = evaluate_flat(&flat, 3, &config)?;
        println!("{:>10.2} {:>10.4}", threshold, result.map);
    }

    Ok(())
}
