//! A feedforward digit classifier trained online, one sample per step.
//!
//! ```
//! use digit_mlp::{Network, Sample, StepOutcome, Topology, TrainingDriver};
//!
//! let topology = Topology::with_input_size(2, &[4, 2]).unwrap();
//! let mut network = Network::build(&topology, 0.1, 3).unwrap();
//! let mut driver = TrainingDriver::new(vec![
//!     Sample::new(0, vec![1.0, 0.0]),
//!     Sample::new(1, vec![0.0, 1.0]),
//! ]);
//! while driver.train_step(&mut network).unwrap() != StepOutcome::Finished {}
//! assert_eq!(driver.history().len(), 3);
//! ```

pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use data::{Dataset, Sample};
pub use error::{NetworkError, Result};
pub use layers::{Layer, Neuron};
pub use loss::CrossEntropyLoss;
pub use network::{Network, NetworkSpec, Topology, INPUT_SIZE};
pub use optim::Sgd;
pub use train::{test_pass, EpochStats, StepOutcome, TrainingDriver};
