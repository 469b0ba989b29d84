use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::data::{Dataset, Sample};
use crate::error::Result;
use crate::network::{Network, DEFAULT_SEED};
use crate::train::epoch_stats::EpochStats;

/// What a single [`TrainingDriver::train_step`] call did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// One sample was trained on; more remain in the current epoch.
    Continue,
    /// An epoch ended and the dataset was reshuffled. More epochs follow.
    EpochDone(EpochStats),
    /// The epoch budget is exhausted (or there is nothing to train on).
    Finished,
}

/// Step-wise online training over a dataset.
///
/// The driver owns the dataset and a cursor `(epoch, sample_index,
/// accumulated_loss)`. Every call to [`train_step`](Self::train_step) does a
/// bounded amount of work, so a caller can interleave training with its own
/// loop and stop at any point simply by no longer calling it.
#[derive(Debug)]
pub struct TrainingDriver {
    dataset: Dataset,
    epoch: usize,
    sample_index: usize,
    accumulated_loss: f64,
    rng: StdRng,
    history: Vec<EpochStats>,
    epoch_started: Option<Instant>,
}

impl TrainingDriver {
    /// A driver that shuffles with a fixed default seed.
    pub fn new(dataset: Dataset) -> TrainingDriver {
        TrainingDriver::with_seed(dataset, DEFAULT_SEED)
    }

    pub fn with_seed(dataset: Dataset, seed: u64) -> TrainingDriver {
        TrainingDriver {
            dataset,
            epoch: 0,
            sample_index: 0,
            accumulated_loss: 0.0,
            rng: StdRng::seed_from_u64(seed),
            history: Vec::new(),
            epoch_started: None,
        }
    }

    /// Advances training by one sample, or closes the epoch when every sample
    /// has been seen.
    ///
    /// Closing an epoch resets the cursor, reshuffles the dataset with a
    /// uniform permutation and returns `EpochDone`, or `Finished` once
    /// `network.epoch_count()` epochs have completed. Calls after that keep
    /// returning `Finished` without touching the network.
    ///
    /// An unlabeled sample is skipped with a warning: the cursor moves past it
    /// and it adds nothing to the epoch loss. A label beyond the output classes
    /// is trained on with the `0.0` loss sentinel. A failed step (e.g. a
    /// dimension mismatch) leaves the cursor where it was.
    pub fn train_step(&mut self, network: &mut Network) -> Result<StepOutcome> {
        let total_epochs = network.epoch_count();
        if self.epoch >= total_epochs {
            return Ok(StepOutcome::Finished);
        }
        if self.dataset.is_empty() {
            warn!("training dataset is empty, nothing to do");
            return Ok(StepOutcome::Finished);
        }

        if self.sample_index < self.dataset.len() {
            if self.epoch_started.is_none() {
                self.epoch_started = Some(Instant::now());
            }
            let sample = &self.dataset[self.sample_index];
            let Some(label) = sample.label else {
                warn!(epoch = self.epoch, sample = self.sample_index, "skipping unlabeled sample");
                self.sample_index += 1;
                return Ok(StepOutcome::Continue);
            };
            let prediction = network.forward_pass(sample)?;
            let loss = Network::compute_loss(label, &prediction);
            network.back_propagation(sample)?;
            self.accumulated_loss += loss;
            self.sample_index += 1;
            return Ok(StepOutcome::Continue);
        }

        Ok(self.finish_epoch(total_epochs))
    }

    /// Calls [`train_step`](Self::train_step) until training finishes and
    /// returns the statistics of every completed epoch.
    pub fn run_to_completion(&mut self, network: &mut Network) -> Result<&[EpochStats]> {
        while self.train_step(network)? != StepOutcome::Finished {}
        Ok(&self.history)
    }

    fn finish_epoch(&mut self, total_epochs: usize) -> StepOutcome {
        let mean_loss = self.accumulated_loss / self.dataset.len() as f64;
        let elapsed_ms = self
            .epoch_started
            .take()
            .map_or(0, |started| started.elapsed().as_millis() as u64);

        self.sample_index = 0;
        self.accumulated_loss = 0.0;
        self.dataset.shuffle(&mut self.rng);
        self.epoch += 1;

        let stats = EpochStats {
            epoch: self.epoch,
            total_epochs,
            mean_loss,
            elapsed_ms,
        };
        info!(epoch = self.epoch, total_epochs, mean_loss, elapsed_ms, "epoch completed");
        self.history.push(stats.clone());

        if self.epoch >= total_epochs {
            info!(epochs = self.epoch, "training finished");
            StepOutcome::Finished
        } else {
            StepOutcome::EpochDone(stats)
        }
    }

    /// Number of completed epochs.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Index of the next sample to train on within the current epoch.
    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    pub fn accumulated_loss(&self) -> f64 {
        self.accumulated_loss
    }

    /// The sample the next step will train on, if the epoch has one left.
    pub fn current_sample(&self) -> Option<&Sample> {
        self.dataset.get(self.sample_index)
    }

    pub fn dataset(&self) -> &[Sample] {
        &self.dataset
    }

    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    pub fn last_epoch(&self) -> Option<&EpochStats> {
        self.history.last()
    }

    pub fn is_finished(&self, network: &Network) -> bool {
        self.dataset.is_empty() || self.epoch >= network.epoch_count()
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}
