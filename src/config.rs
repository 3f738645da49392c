//! Evaluation configuration.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{MapEvalError, Result};
use crate::threshold::validate_threshold;

/// Default IoU cutoff above which a detection may claim a ground truth.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Options recognized by [`crate::evaluator::evaluate_columns`].
///
/// ```
/// use map_eval::config::EvalConfig;
///
/// let config = EvalConfig::from_json_str(r#"{"iou_threshold": 0.75}"#).unwrap();
/// assert_eq!(config.iou_threshold, 0.75);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// A detection matches only when its IoU is strictly greater than this.
    pub iou_threshold: f64,
    /// Evaluate classes on the rayon thread pool.
    pub parallel: bool,
    /// Compute-target hint. Accepted for compatibility and otherwise ignored.
    pub device: Option<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            parallel: true,
            device: None,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the configuration can drive an evaluation.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.iou_threshold)
    }

    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: EvalConfig = serde_json::from_str(json_str)
            .map_err(|e| MapEvalError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: EvalConfig = serde_json::from_reader(reader)
            .map_err(|e| MapEvalError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
