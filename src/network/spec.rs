use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::network::{Network, DEFAULT_SEED};
use crate::network::topology::{Topology, INPUT_SIZE};

/// A serializable description of a network architecture plus its training
/// hyperparameters.
///
/// Only the shape and settings are stored. Trained weights are never written
/// out; loading a spec and calling [`NetworkSpec::build`] always yields a
/// freshly initialized network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the spec file stem.
    pub name: String,
    /// Length of every input vector.
    #[serde(default = "default_input_size")]
    pub input_size: usize,
    /// Neuron count of every layer, first hidden layer first. The input
    /// dimension lives in `input_size`; the last entry is the number of output
    /// classes.
    pub layers: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Seed for weight initialization and per-epoch shuffling.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_input_size() -> usize {
    INPUT_SIZE
}

fn default_learning_rate() -> f64 {
    0.001
}

fn default_epochs() -> usize {
    10
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl NetworkSpec {
    /// A digit classifier spec with default hyperparameters.
    pub fn new(name: impl Into<String>, layers: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            input_size: default_input_size(),
            layers,
            learning_rate: default_learning_rate(),
            epochs: default_epochs(),
            seed: default_seed(),
        }
    }

    pub fn topology(&self) -> Result<Topology> {
        Topology::with_input_size(self.input_size, &self.layers)
    }

    /// Validates the spec and builds a network seeded from `seed`.
    pub fn build(&self) -> Result<Network> {
        let topology = self.topology()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        Network::build_with_rng(&topology, self.learning_rate, self.epochs, &mut rng)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn missing_fields_take_defaults() {
        let spec: NetworkSpec =
            serde_json::from_str(r#"{ "name": "digits", "layers": [32, 10] }"#).unwrap();
        assert_eq!(spec, NetworkSpec::new("digits", vec![32, 10]));
        assert_eq!(spec.input_size, 784);
        assert_eq!(spec.learning_rate, 0.001);
        assert_eq!(spec.epochs, 10);
    }

    #[test]
    fn build_uses_spec_settings() {
        let mut spec = NetworkSpec::new("toy", vec![3, 2]);
        spec.input_size = 4;
        spec.learning_rate = 0.25;
        spec.epochs = 7;
        let network = spec.build().unwrap();
        assert_eq!(network.input_size(), 4);
        assert_eq!(network.output_size(), 2);
        assert_eq!(network.learning_rate(), 0.25);
        assert_eq!(network.epoch_count(), 7);
        assert_eq!(network.layers().len(), 2);
        assert!(network.layers()[0].neurons().iter().all(|n| n.weights().len() == 4));
    }

    #[test]
    fn same_seed_same_weights() {
        let spec = NetworkSpec::new("seeded", vec![5, 3]);
        let a = spec.build().unwrap();
        let b = spec.build().unwrap();
        assert_eq!(a.layers()[1].neurons(), b.layers()[1].neurons());
    }

    #[test]
    fn invalid_layers_fail_to_build() {
        let spec = NetworkSpec::new("broken", vec![4, 0, 10]);
        assert!(matches!(spec.build(), Err(NetworkError::Validation(_))));
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("digit-mlp-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let mut spec = NetworkSpec::new("roundtrip", vec![64, 10]);
        spec.seed = 3;
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(loaded, spec);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = NetworkSpec::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
