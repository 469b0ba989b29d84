use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

/// One unit of a dense layer.
///
/// `weights` and `bias` change only through the explicit update operations.
/// `pre_activation`, `output` and `gradient` are scratch values that describe
/// the sample most recently forward/back-propagated.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    output: f64,
    pre_activation: f64,
    gradient: f64,
}

impl Neuron {
    /// A neuron with `input_size` He-initialized weights and a zero bias.
    pub fn new<R: Rng + ?Sized>(input_size: usize, rng: &mut R) -> Neuron {
        let mut neuron = Neuron::with_weights(Vec::new(), 0.0);
        neuron.initialize_weights(input_size, rng);
        neuron
    }

    /// A neuron with explicit parameters.
    pub fn with_weights(weights: Vec<f64>, bias: f64) -> Neuron {
        Neuron {
            weights,
            bias,
            output: 0.0,
            pre_activation: 0.0,
            gradient: 0.0,
        }
    }

    /// He initialization: samples every weight from N(0, sqrt(2 / input_size))
    /// and resets the bias to zero.
    pub fn initialize_weights<R: Rng + ?Sized>(&mut self, input_size: usize, rng: &mut R) {
        let std_dev = (2.0 / input_size as f64).sqrt();
        self.weights = (0..input_size)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                z * std_dev
            })
            .collect();
        self.bias = 0.0;
    }

    /// `bias + Σ weights[k] * inputs[k]`.
    pub fn weighted_sum(&self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.weights.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }
        Ok(self
            .weights
            .iter()
            .zip(inputs)
            .fold(self.bias, |sum, (w, x)| sum + w * x))
    }

    /// Caches `z` as the pre-activation, stores the activated value as the
    /// output and returns it.
    pub fn activate(&mut self, z: f64, activation: ActivationFunction) -> f64 {
        self.pre_activation = z;
        self.output = activation.function(z);
        self.output
    }

    pub fn update_weight(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.weights.len();
        let weight = self
            .weights
            .get_mut(index)
            .ok_or(NetworkError::WeightIndexOutOfRange { index, len })?;
        *weight = value;
        Ok(())
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, value: f64) {
        self.bias = value;
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    /// Overwrites the cached output without touching the pre-activation.
    /// The network uses this to store softmax probabilities on output neurons.
    pub fn set_output(&mut self, value: f64) {
        self.output = value;
    }

    pub fn pre_activation(&self) -> f64 {
        self.pre_activation
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn set_gradient(&mut self, value: f64) {
        self.gradient = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn he_init_sets_length_and_zero_bias() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut neuron = Neuron::with_weights(vec![1.0], 3.0);
        neuron.initialize_weights(784, &mut rng);
        assert_eq!(neuron.weights().len(), 784);
        assert_eq!(neuron.bias(), 0.0);
    }

    #[test]
    fn he_init_uses_exact_fan_in() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut replay = StdRng::seed_from_u64(9);
        let neuron = Neuron::new(4, &mut rng);
        for &w in neuron.weights() {
            let z: f64 = StandardNormal.sample(&mut replay);
            assert_relative_eq!(w, z * (0.5f64).sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn he_init_spread_matches_fan_in() {
        let mut rng = StdRng::seed_from_u64(42);
        let neuron = Neuron::new(20_000, &mut rng);
        let n = neuron.weights().len() as f64;
        let mean = neuron.weights().iter().sum::<f64>() / n;
        let var = neuron.weights().iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.001);
        // Expected variance is 2 / 20_000 = 1e-4.
        assert_relative_eq!(var, 1e-4, max_relative = 0.05);
    }

    #[test]
    fn weighted_sum_includes_bias() {
        let neuron = Neuron::with_weights(vec![0.5, -1.0, 2.0], 0.25);
        let z = neuron.weighted_sum(&[2.0, 1.0, 0.5]).unwrap();
        assert_relative_eq!(z, 0.25 + 1.0 - 1.0 + 1.0);
    }

    #[test]
    fn weighted_sum_rejects_wrong_length() {
        let neuron = Neuron::with_weights(vec![0.5, -1.0], 0.0);
        let err = neuron.weighted_sum(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn activate_caches_pre_activation() {
        let mut neuron = Neuron::with_weights(vec![], 0.0);
        assert_eq!(neuron.activate(-1.5, ActivationFunction::ReLU), 0.0);
        assert_eq!(neuron.pre_activation(), -1.5);
        assert_eq!(neuron.output(), 0.0);

        assert_eq!(neuron.activate(-1.5, ActivationFunction::Identity), -1.5);
        assert_eq!(neuron.output(), -1.5);
    }

    #[test]
    fn update_weight_bounds_checked() {
        let mut neuron = Neuron::with_weights(vec![0.0, 0.0], 0.0);
        neuron.update_weight(1, 4.0).unwrap();
        assert_eq!(neuron.weights(), &[0.0, 4.0]);
        assert!(matches!(
            neuron.update_weight(2, 1.0),
            Err(NetworkError::WeightIndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
