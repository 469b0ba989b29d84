use serde::{Deserialize, Serialize};

/// Statistics for one completed training epoch.
///
/// `TrainingDriver` records one value per epoch in its history and hands it
/// to the caller through `StepOutcome::EpochDone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy loss over all samples in this epoch, measured on
    /// each sample just before its weight update.
    pub mean_loss: f64,
    /// Wall-clock time from the epoch's first step to its completion, in
    /// milliseconds.
    pub elapsed_ms: u64,
}
