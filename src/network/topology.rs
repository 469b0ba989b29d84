use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Input dimension of a 28x28 digit grid.
pub const INPUT_SIZE: usize = 784;

/// A validated, immutable network shape.
///
/// `layers` holds the neuron count of every layer in order; the last entry is
/// the number of output classes. The input dimension is not a layer: it only
/// fixes how many weights the first layer's neurons carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    input_size: usize,
    layers: Vec<usize>,
}

impl Topology {
    /// Validates `sizes` against the fixed 784-pixel input.
    pub fn validate(sizes: &[usize]) -> Result<Topology> {
        Topology::with_input_size(INPUT_SIZE, sizes)
    }

    pub fn with_input_size(input_size: usize, sizes: &[usize]) -> Result<Topology> {
        if input_size == 0 {
            return Err(NetworkError::Validation("input size must be at least 1".into()));
        }
        if sizes.is_empty() {
            return Err(NetworkError::Validation("topology has no layers".into()));
        }
        if let Some(layer) = sizes.iter().position(|&n| n == 0) {
            return Err(NetworkError::Validation(format!("layer {layer} has no neurons")));
        }
        Ok(Topology {
            input_size,
            layers: sizes.to_vec(),
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn output_size(&self) -> usize {
        // Validation guarantees at least one layer.
        self.layers.last().copied().unwrap_or_default()
    }

    /// `(neurons, inputs_per_neuron)` for every layer, in order.
    pub fn fan_in(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let inputs = std::iter::once(self.input_size).chain(self.layers.iter().copied());
        self.layers.iter().copied().zip(inputs)
    }
}
