use serde::{Deserialize, Serialize};

/// Element-wise activation applied by a layer after the weighted sum.
///
/// Hidden layers use `ReLU`. The output layer uses `Identity` so its neurons
/// hold raw logits; the network then turns the whole logit vector into
/// probabilities with [`softmax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation value.
    ///
    /// The ReLU derivative at exactly `0.0` is taken as `0.0`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
        }
    }
}

/// Numerically stable softmax.
///
/// The maximum logit is subtracted before exponentiating so large logits
/// cannot overflow. An empty slice yields an empty vector.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max_logit).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
