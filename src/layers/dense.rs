use rand::Rng;

use crate::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::neuron::Neuron;

/// A fully connected layer: an ordered set of neurons sharing one activation.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
    activator: ActivationFunction,
}

impl Layer {
    /// `size` freshly He-initialized neurons, each with `input_size` weights.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let neurons = (0..size).map(|_| Neuron::new(input_size, &mut *rng)).collect();
        Layer::from_neurons(neurons, activation)
    }

    pub fn from_neurons(neurons: Vec<Neuron>, activation: ActivationFunction) -> Layer {
        Layer {
            neurons,
            activator: activation,
        }
    }

    /// Evaluates every neuron on `inputs` and returns the activations in order.
    /// Each neuron caches its pre-activation and output for backprop.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let activator = self.activator;
        self.neurons
            .iter_mut()
            .map(|neuron| {
                let z = neuron.weighted_sum(inputs)?;
                Ok(neuron.activate(z, activator))
            })
            .collect()
    }

    /// Cached outputs from the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::output).collect()
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Mutable access to the neurons. The slice cannot grow or shrink, so the
    /// layer's size stays fixed.
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator
    }

    /// Number of weights each neuron expects, or `None` for an empty layer or
    /// one whose neurons disagree.
    pub fn input_size(&self) -> Option<usize> {
        let first = self.neurons.first()?.weights().len();
        self.neurons
            .iter()
            .all(|n| n.weights().len() == first)
            .then_some(first)
    }
}
