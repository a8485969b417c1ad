//! Agreement scoring between gold and predicted tag columns.

pub mod chunks;
pub mod report;

use tracing::info;

use crate::error::{Error, Result};
pub use report::{ClassificationReport, EntityScorer, EvalMode, LabelScores, Scorer};

/// Flatten per-document sequences and score them with `scorer`.
///
/// Documents are concatenated in order, so a chunk left open at the end of one
/// document may continue into the next when its first tag is `I-` of the same
/// type.
pub fn classification_report<S: Scorer + ?Sized>(
    truth: &[Vec<String>],
    pred: &[Vec<String>],
    mode: EvalMode,
    scorer: &S,
) -> Result<ClassificationReport> {
    let flat_truth: Vec<String> = truth.iter().flatten().cloned().collect();
    let flat_pred: Vec<String> = pred.iter().flatten().cloned().collect();
    if flat_truth.len() != flat_pred.len() {
        return Err(Error::LengthMismatch {
            truth: flat_truth.len(),
            pred: flat_pred.len(),
        });
    }
    info!(tags = flat_truth.len(), %mode, "scoring tag sequences");
    scorer.score(&flat_truth, &flat_pred, mode)
}
