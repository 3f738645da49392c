//! # map-eval
//!
//! A Rust library computing Mean Average Precision (mAP) for object detection
//! outputs with the PASCAL VOC 11-point interpolation.
//!
//! Given, per image, predicted boxes with class labels and confidence scores,
//! and ground-truth boxes with class labels and a difficulty flag, it produces
//! a per-class Average Precision (AP) and their mean.
//!
//! ## Pipeline
//!
//! - **Aggregation**: per-image inputs are flattened into image-indexed tables
//!   ([`aggregator`])
//! - **Overlap**: pairwise IoU of corner-format boxes ([`metrics::iou`])
//! - **Matching**: greedy per-class assignment of detections to ground truths
//!   in descending score order ([`matching`])
//! - **Integration**: cumulative precision-recall curve, 11-point interpolated
//!   AP and mAP ([`metrics::precision_recall`], [`metrics::ap`])
//!
//! Classes are independent and are evaluated on the rayon thread pool unless
//! [`EvalConfig::parallel`] is turned off.
//!
//! ## Quick Start
//!
//! ```rust
//! use map_eval::evaluator::evaluate;
//! use map_eval::{BoundingBox, Detection, GroundTruth};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detections = vec![vec![
//!     Detection::new(BoundingBox::new(10.0, 10.0, 50.0, 50.0), 0, 0.9),
//!     Detection::new(BoundingBox::new(12.0, 10.0, 50.0, 50.0), 0, 0.6),
//! ]];
//! let ground_truths = vec![vec![GroundTruth::new(BoundingBox::new(10.0, 10.0, 50.0, 50.0), 0)]];
//!
//! let result = evaluate(&detections, &ground_truths, 1, Some(0.5))?;
//! println!("mAP: {:.4}", result.map);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod loader;
pub mod threshold;
pub mod aggregator;
pub mod metrics;
pub mod matching;
pub mod stats;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{MapEvalError, Result};
pub use types::{
    BoundingBox, ColumnarInput, Detection, EvaluationInput, GroundTruth, MapResult,
    MatchOutcome, PrecisionRecallPoint,
};
pub use config::EvalConfig;
pub use evaluator::{evaluate, evaluate_columns, evaluate_input};
pub use loader::{load_from_file, load_from_string};
pub use stats::ClassStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        // Basic smoke test to ensure the library compiles
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.is_valid());
    }
}
