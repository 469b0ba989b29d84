use crate::error::{NetworkError, Result};
use crate::layers::neuron::Neuron;

/// Plain online stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to `neuron` given its error signal and the
    /// activations that fed it:
    ///   w[k] -= lr * gradient * inputs[k]
    ///   b    -= lr * gradient
    pub fn step(&self, neuron: &mut Neuron, gradient: f64, inputs: &[f64]) -> Result<()> {
        let expected = neuron.weights().len();
        if inputs.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                actual: inputs.len(),
            });
        }
        for (k, x) in inputs.iter().enumerate() {
            let updated = neuron.weights()[k] - self.learning_rate * gradient * x;
            neuron.update_weight(k, updated)?;
        }
        neuron.set_bias(neuron.bias() - self.learning_rate * gradient);
        Ok(())
    }
}
