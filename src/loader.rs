//! JSON loading utilities for evaluation inputs.
//!
//! The document holds the class count and six per-image columns:
//!
//! ```json
//! {
//!   "n_classes": 2,
//!   "det_boxes": [[[10.0, 10.0, 50.0, 50.0]]],
//!   "det_labels": [[1]],
//!   "det_scores": [[0.9]],
//!   "true_boxes": [[[12.0, 10.0, 50.0, 52.0]]],
//!   "true_labels": [[1]],
//!   "true_difficulties": [[false]]
//! }
//! ```
//!
//! Only JSON structure is checked here; column lengths are validated when the
//! input is evaluated.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::types::EvaluationInput;

/// Load an evaluation input from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```no_run
/// use map_eval::loader::load_from_file;
///
/// let input = load_from_file("predictions.json").unwrap();
/// println!("Loaded {} images", input.columns.det_boxes.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<EvaluationInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let input: EvaluationInput = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Load an evaluation input from a JSON string.
///
/// # Example
///
/// ```
/// use map_eval::loader::load_from_string;
///
/// let json = r#"{
///     "n_classes": 1,
///     "det_boxes": [], "det_labels": [], "det_scores": [],
///     "true_boxes": [], "true_labels": [], "true_difficulties": []
/// }"#;
/// let input = load_from_string(json).unwrap();
/// assert_eq!(input.n_classes, 1);
/// ```
pub fn load_from_string(json_str: &str) -> Result<EvaluationInput> {
    let input: EvaluationInput = serde_json::from_str(json_str)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_load_from_string() {
        let json = r#"{
            "n_classes": 2,
            "det_boxes": [[[10.0, 20.0, 30.0, 40.0]], []],
            "det_labels": [[1], []],
            "det_scores": [[0.75], []],
            "true_boxes": [[], [[0.0, 0.0, 5.0, 5.0]]],
            "true_labels": [[], [0]],
            "true_difficulties": [[], [true]]
        }"#;

        let input = load_from_string(json).unwrap();
        assert_eq!(input.n_classes, 2);
        assert_eq!(
            input.columns.det_boxes[0][0],
            BoundingBox::new(10.0, 20.0, 30.0, 40.0)
        );
        assert_eq!(input.columns.true_difficulties[1], vec![true]);
    }

    #[test]
    fn test_missing_column() {
        let json = r#"{
            "n_classes": 1,
            "det_boxes": [], "det_labels": [], "det_scores": [],
            "true_boxes": [], "true_labels": []
        }"#;

        assert!(load_from_string(json).is_err());
    }

    #[test]
    fn test_invalid_box_arity() {
        let json = r#"{
            "n_classes": 1,
            "det_boxes": [[[10.0, 20.0, 30.0]]], "det_labels": [[0]], "det_scores": [[0.5]],
            "true_boxes": [[]], "true_labels": [[]], "true_difficulties": [[]]
        }"#;

        assert!(load_from_string(json).is_err());
    }
}
