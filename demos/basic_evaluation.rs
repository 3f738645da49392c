//! Basic evaluation example demonstrating core functionality.

use map_eval::{
    evaluate, load_from_string, metrics::iou::calculate_iou, BoundingBox, Detection, EvalConfig,
    GroundTruth,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("map_eval=debug")),
        )
        .init();

    println!("=== mAP Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let bbox1 = BoundingBox::new(10.0, 10.0, 60.0, 60.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 80.0, 80.0);
    let iou = calculate_iou(&bbox1, &bbox2);
    println!("   IoU between overlapping boxes: {:.4}", iou);
    println!();

    // Example 2: Per-image records
    println!("2. Evaluating per-image records");
    let detections = vec![
        vec![
            Detection::new(BoundingBox::new(100.0, 100.0, 300.0, 250.0), 0, 0.92),
            Detection::new(BoundingBox::new(105.0, 98.0, 298.0, 255.0), 0, 0.61),
            Detection::new(BoundingBox::new(350.0, 200.0, 450.0, 320.0), 1, 0.88),
        ],
        vec![Detection::new(BoundingBox::new(40.0, 40.0, 90.0, 120.0), 1, 0.35)],
    ];
    let ground_truths = vec![
        vec![
            GroundTruth::new(BoundingBox::new(100.0, 100.0, 300.0, 250.0), 0),
            GroundTruth::new(BoundingBox::new(355.0, 205.0, 450.0, 320.0), 1),
        ],
        vec![
            GroundTruth::new(BoundingBox::new(200.0, 40.0, 260.0, 120.0), 1),
            GroundTruth::difficult(BoundingBox::new(0.0, 0.0, 15.0, 15.0), 0),
        ],
    ];

    let result = evaluate(&detections, &ground_truths, 2, None)?;
    for (class_id, ap) in &result.ap_per_class {
        println!("   class {}: AP = {:.4}", class_id, ap);
    }
    println!("   mAP = {:.4}", result.map);
    for stats in &result.class_stats {
        println!("   {}", stats.summary_string());
    }
    println!();

    // Example 3: Columnar JSON input
    println!("3. Evaluating a columnar JSON document");
    let input_json = r#"{
        "n_classes": 2,
        "det_boxes": [[[10.0, 10.0, 50.0, 50.0]], [[0.0, 0.0, 20.0, 20.0]]],
        "det_labels": [[0], [1]],
        "det_scores": [[0.8], [0.7]],
        "true_boxes": [[[12.0, 10.0, 50.0, 52.0]], [[30.0, 30.0, 60.0, 60.0]]],
        "true_labels": [[0], [1]],
        "true_difficulties": [[false], [false]]
    }"#;

    let input = load_from_string(input_json)?;
    let config = EvalConfig::default();
    let result = map_eval::evaluate_input(&input, &config)?;
    println!("   mAP @ IoU>{:.2} = {:.4}", config.iou_threshold, result.map);

    Ok(())
}
