//! Per-class matching statistics
//!
//! This module provides the counters collected while one class is matched and
//! integrated, reported alongside the AP values.

use serde::{Deserialize, Serialize};

use crate::matching::ClassMatches;

/// Statistics collected during the evaluation of one class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Class id these counters belong to
    pub class_id: usize,

    /// Number of detections labelled with this class
    pub detections: usize,

    /// Number of ground truths of this class, difficult ones included
    pub ground_truths: usize,

    /// Number of non-difficult ground truths (recall denominator)
    pub easy_ground_truths: usize,

    /// Detections that claimed a ground truth
    pub true_positives: usize,

    /// Detections without an unclaimed match above the IoU threshold
    pub false_positives: usize,

    /// Detections absorbed by difficult ground truths
    pub ignored: usize,

    /// Average precision of the class
    pub ap: f64,
}

impl ClassStats {
    /// Create a new `ClassStats` for `class_id` with all counters at zero
    pub fn new(class_id: usize) -> Self {
        Self {
            class_id,
            ..Self::default()
        }
    }

    /// Collect the counters of a finished matching pass
    pub fn from_matches(matches: &ClassMatches, ap: f64) -> Self {
        Self {
            class_id: matches.class_id,
            detections: matches.outcomes.len(),
            ground_truths: matches.n_ground_truths,
            easy_ground_truths: matches.n_easy,
            true_positives: matches.true_positives(),
            false_positives: matches.false_positives(),
            ignored: matches.ignored(),
            ap,
        }
    }

    /// Easy ground truths no detection claimed
    pub fn missed(&self) -> usize {
        self.easy_ground_truths.saturating_sub(self.true_positives)
    }

    /// Final recall of the class, 0 when it has no easy ground truth
    pub fn recall(&self) -> f64 {
        if self.easy_ground_truths == 0 {
            return 0.0;
        }
        self.true_positives as f64 / self.easy_ground_truths as f64
    }

    /// Emit the counters as a structured `debug` event
    pub fn log_summary(&self) {
        tracing::debug!(
            class_id = self.class_id,
            detections = self.detections,
            ground_truths = self.ground_truths,
            easy = self.easy_ground_truths,
            tp = self.true_positives,
            fp = self.false_positives,
            ignored = self.ignored,
            ap = self.ap,
            "class evaluated"
        );
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "ClassStats {{ class: {}, detections: {}, easy_gt: {}, tp: {}, fp: {}, ignored: {}, ap: {:.4} }}",
            self.class_id,
            self.detections,
            self.easy_ground_truths,
            self.true_positives,
            self.false_positives,
            self.ignored,
            self.ap
        )
    }
}
