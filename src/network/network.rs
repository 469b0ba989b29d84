use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::activation::{softmax, ActivationFunction};
use crate::data::Sample;
use crate::error::{NetworkError, Result};
use crate::layers::{Layer, Neuron};
use crate::loss::CrossEntropyLoss;
use crate::network::topology::Topology;
use crate::optim::Sgd;

/// Seed used when the caller does not supply a random source.
pub const DEFAULT_SEED: u64 = 0x5EED_D161;

/// A feedforward classifier: ReLU hidden layers, an Identity output layer and
/// a softmax over its logits.
///
/// The shape is frozen at build time. Changing the topology means building a
/// new `Network`; nothing here adds or removes layers or neurons.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    topology: Topology,
    optimizer: Sgd,
    epochs: usize,
}

impl Network {
    /// Builds a network with He-initialized weights drawn from a fixed seed.
    pub fn build(topology: &Topology, learning_rate: f64, epochs: usize) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        Network::build_with_rng(topology, learning_rate, epochs, &mut rng)
    }

    /// Builds a network drawing initial weights from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(
        topology: &Topology,
        learning_rate: f64,
        epochs: usize,
        rng: &mut R,
    ) -> Result<Network> {
        check_hyperparameters(learning_rate, epochs)?;

        let last = topology.layer_count() - 1;
        let layers = topology
            .fan_in()
            .enumerate()
            .map(|(index, (size, input_size))| {
                debug!(layer = index, neurons = size, inputs = input_size, "initializing layer");
                Layer::new(size, input_size, activation_for(index, last), &mut *rng)
            })
            .collect();

        info!(
            input_size = topology.input_size(),
            layers = ?topology.layer_sizes(),
            learning_rate,
            epochs,
            "network built"
        );

        Ok(Network {
            layers,
            topology: topology.clone(),
            optimizer: Sgd::new(learning_rate),
            epochs,
        })
    }

    /// Builds a network from explicit neurons, one `Vec` per layer.
    ///
    /// Every neuron of the first layer must carry `input_size` weights and
    /// every neuron of a later layer one weight per neuron of the layer before.
    pub fn from_neurons(
        input_size: usize,
        layers: Vec<Vec<Neuron>>,
        learning_rate: f64,
        epochs: usize,
    ) -> Result<Network> {
        check_hyperparameters(learning_rate, epochs)?;
        let sizes: Vec<usize> = layers.iter().map(Vec::len).collect();
        let topology = Topology::with_input_size(input_size, &sizes)?;

        for (index, (neurons, (_, expected))) in layers.iter().zip(topology.fan_in()).enumerate() {
            if let Some(neuron) = neurons.iter().find(|n| n.weights().len() != expected) {
                let actual = neuron.weights().len();
                error!(layer = index, expected, actual, "neuron weight count disagrees with its inputs");
                return Err(NetworkError::DimensionMismatch { expected, actual });
            }
        }

        let last = topology.layer_count() - 1;
        let layers = layers
            .into_iter()
            .enumerate()
            .map(|(index, neurons)| Layer::from_neurons(neurons, activation_for(index, last)))
            .collect();

        Ok(Network {
            layers,
            topology,
            optimizer: Sgd::new(learning_rate),
            epochs,
        })
    }

    /// Runs `sample` through every layer and returns the softmax probabilities
    /// of the output layer.
    ///
    /// Each neuron keeps its pre-activation and output for a following
    /// [`Network::back_propagation`]; output neurons hold the probabilities.
    pub fn forward_pass(&mut self, sample: &Sample) -> Result<Vec<f64>> {
        let features = &sample.features;
        if features.len() != self.topology.input_size() {
            warn!(
                expected = self.topology.input_size(),
                actual = features.len(),
                "input size does not match the network input"
            );
        }

        let mut activations: Vec<f64> = Vec::new();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            let inputs: &[f64] = if index == 0 { features } else { &activations };
            let next = layer.forward(inputs).map_err(|err| {
                error!(layer = index, %err, "forward pass aborted");
                err
            })?;
            activations = next;
        }

        if let Some(index) = activations.iter().position(|z| !z.is_finite()) {
            error!(neuron = index, logit = activations[index], "output logit is not finite");
            return Err(NetworkError::NonFiniteOutput { index });
        }

        let probabilities = softmax(&activations);
        if let Some(output_layer) = self.layers.last_mut() {
            for (neuron, p) in output_layer.neurons_mut().iter_mut().zip(&probabilities) {
                neuron.set_output(*p);
            }
        }
        Ok(probabilities)
    }

    /// Backpropagates the cross-entropy error of `sample` and applies one SGD
    /// step to every weight and bias.
    ///
    /// Must follow a [`Network::forward_pass`] on the same sample: gradients
    /// are derived from the activations cached by that pass. The output layer
    /// is updated first; hidden layers are then processed last to first, each
    /// reading the error signal (and the already updated weights) of the
    /// layer after it.
    ///
    /// A label past the last output class has no one-hot entry, so every
    /// output is pushed towards zero. This mirrors the `0.0` loss sentinel of
    /// [`Network::compute_loss`] and lets a training loop carry on past a
    /// mislabeled sample.
    pub fn back_propagation(&mut self, sample: &Sample) -> Result<()> {
        let label = sample.label.ok_or(NetworkError::UnlabeledSample)?;
        if sample.features.len() != self.topology.input_size() {
            error!(
                expected = self.topology.input_size(),
                actual = sample.features.len(),
                "backpropagation aborted"
            );
            return Err(NetworkError::DimensionMismatch {
                expected: self.topology.input_size(),
                actual: sample.features.len(),
            });
        }

        let optimizer = self.optimizer;
        let last = self.layers.len() - 1;

        let predicted = self.layers[last].outputs();
        let gradients = CrossEntropyLoss::derivative(label, &predicted);
        let inputs = self.layer_inputs(last, &sample.features);
        for (neuron, &gradient) in self.layers[last].neurons_mut().iter_mut().zip(&gradients) {
            neuron.set_gradient(gradient);
            optimizer.step(neuron, gradient, &inputs)?;
        }

        for index in (0..last).rev() {
            let errors = self.error_signals(index);
            let inputs = self.layer_inputs(index, &sample.features);
            let activation = self.layers[index].activation();
            for (neuron, error) in self.layers[index].neurons_mut().iter_mut().zip(errors) {
                let gradient = error * activation.derivative(neuron.pre_activation());
                neuron.set_gradient(gradient);
                optimizer.step(neuron, gradient, &inputs)?;
            }
        }
        Ok(())
    }

    /// Cross-entropy of one prediction: `-ln(max(1e-6, prediction[label]))`.
    ///
    /// Returns `0.0` when `label` is not a valid index into `prediction`.
    /// That keeps the training loop branch-free but also means a mislabeled
    /// sample contributes nothing to the reported loss.
    pub fn compute_loss(label: usize, prediction: &[f64]) -> f64 {
        CrossEntropyLoss::loss(label, prediction)
    }

    /// Index of the largest value; the first one wins on ties.
    pub fn predict(output: &[f64]) -> Result<usize> {
        let (first, rest) = output.split_first().ok_or(NetworkError::EmptyPrediction)?;
        let mut best_index = 0;
        let mut best = *first;
        for (i, &value) in rest.iter().enumerate() {
            if value > best {
                best = value;
                best_index = i + 1;
            }
        }
        Ok(best_index)
    }

    pub fn epoch_count(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn input_size(&self) -> usize {
        self.topology.input_size()
    }

    pub fn output_size(&self) -> usize {
        self.topology.output_size()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Activations that fed layer `index`: raw features for the first layer,
    /// otherwise the cached outputs of the layer before it.
    fn layer_inputs(&self, index: usize, features: &[f64]) -> Vec<f64> {
        if index == 0 {
            features.to_vec()
        } else {
            self.layers[index - 1].outputs()
        }
    }

    /// Σ_j next[j].gradient * next[j].weights[i] for every neuron i of layer
    /// `index`.
    fn error_signals(&self, index: usize) -> Vec<f64> {
        let next = self.layers[index + 1].neurons();
        (0..self.layers[index].neuron_count())
            .map(|i| next.iter().map(|n| n.gradient() * n.weights()[i]).sum())
            .collect()
    }
}

fn activation_for(index: usize, last: usize) -> ActivationFunction {
    if index == last {
        ActivationFunction::Identity
    } else {
        ActivationFunction::ReLU
    }
}

fn check_hyperparameters(learning_rate: f64, epochs: usize) -> Result<()> {
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(NetworkError::Validation(format!(
            "learning rate must be a positive number, got {learning_rate}"
        )));
    }
    if epochs == 0 {
        return Err(NetworkError::Validation("epoch count must be at least 1".into()));
    }
    Ok(())
}
