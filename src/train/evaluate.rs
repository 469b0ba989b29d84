use tracing::{info, warn};

use crate::data::Sample;
use crate::error::Result;
use crate::network::Network;

/// Classifies every sample and returns the percentage predicted correctly.
///
/// Only forward passes are run, so no weights change. Unlabeled samples count
/// toward the total but can never be correct. An empty dataset scores `0.0`.
pub fn test_pass(network: &mut Network, dataset: &[Sample]) -> Result<f64> {
    if dataset.is_empty() {
        warn!("test dataset is empty");
        return Ok(0.0);
    }

    let mut correct = 0usize;
    for sample in dataset {
        let output = network.forward_pass(sample)?;
        let predicted = Network::predict(&output)?;
        if sample.label == Some(predicted) {
            correct += 1;
        }
    }

    let accuracy = correct as f64 / dataset.len() as f64 * 100.0;
    info!(correct, total = dataset.len(), accuracy, "test pass complete");
    Ok(accuracy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Neuron;

    /// Class 0 when the first feature dominates, class 1 otherwise.
    fn fixed_classifier() -> Network {
        Network::from_neurons(
            2,
            vec![vec![
                Neuron::with_weights(vec![1.0, -1.0], 0.0),
                Neuron::with_weights(vec![-1.0, 1.0], 0.0),
            ]],
            0.1,
            1,
        )
        .unwrap()
    }

    #[test]
    fn counts_correct_predictions() {
        let mut network = fixed_classifier();
        let dataset = vec![
            Sample::new(0, vec![0.9, 0.1]),
            Sample::new(1, vec![0.2, 0.8]),
            Sample::new(1, vec![0.7, 0.3]),
            Sample::unlabeled(vec![0.0, 1.0]),
        ];
        let accuracy = test_pass(&mut network, &dataset).unwrap();
        assert_eq!(accuracy, 50.0);
    }

    #[test]
    fn does_not_touch_weights() {
        let mut network = fixed_classifier();
        let before = network.layers()[0].neurons().to_vec();
        test_pass(&mut network, &[Sample::new(0, vec![1.0, 0.0])]).unwrap();
        let after: Vec<_> = network.layers()[0].neurons().iter().map(|n| n.weights().to_vec()).collect();
        let expected: Vec<_> = before.iter().map(|n| n.weights().to_vec()).collect();
        assert_eq!(after, expected);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        let mut network = fixed_classifier();
        assert_eq!(test_pass(&mut network, &[]).unwrap(), 0.0);
    }

    #[test]
    fn wrong_input_length_is_an_error() {
        let mut network = fixed_classifier();
        assert!(test_pass(&mut network, &[Sample::new(0, vec![1.0])]).is_err());
    }
}
