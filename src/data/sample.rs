use serde::{Deserialize, Serialize};

/// One example: a feature vector plus an optional class label.
///
/// Digit samples carry 784 pixel intensities in `[0, 1]`. A sample without a
/// label can be run through the network but not trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: Option<usize>,
    pub features: Vec<f64>,
}

impl Sample {
    pub fn new(label: usize, features: Vec<f64>) -> Sample {
        Sample {
            label: Some(label),
            features,
        }
    }

    /// An inference-only sample, e.g. a freshly drawn digit.
    pub fn unlabeled(features: Vec<f64>) -> Sample {
        Sample {
            label: None,
            features,
        }
    }
}

/// An ordered collection of samples. Training shuffles it in place between
/// epochs.
pub type Dataset = Vec<Sample>;
