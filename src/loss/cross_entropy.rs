/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Floor applied to the true-class probability before taking the log.
const EPS: f64 = 1e-6;

impl CrossEntropyLoss {
    /// Computes `-ln(max(EPS, prediction[label]))`.
    ///
    /// A label outside `0..prediction.len()` yields `0.0` instead of an error
    /// so the training loop never has to branch on it. This also hides
    /// mislabeled samples: a wrong label index silently contributes no loss.
    pub fn loss(label: usize, prediction: &[f64]) -> f64 {
        match prediction.get(label) {
            Some(&p) => -p.max(EPS).ln(),
            None => 0.0,
        }
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the logits:
    ///   ∂L/∂z_i = predicted[i] - (i == label ? 1 : 0)
    pub fn derivative(label: usize, prediction: &[f64]) -> Vec<f64> {
        prediction
            .iter()
            .enumerate()
            .map(|(i, p)| if i == label { p - 1.0 } else { *p })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_is_negative_log_of_true_class() {
        let loss = CrossEntropyLoss::loss(2, &[0.1, 0.1, 0.8]);
        assert_relative_eq!(loss, -(0.8f64).ln());
        assert_relative_eq!(loss, 0.223, epsilon = 1e-3);
    }

    #[test]
    fn loss_is_clamped_near_zero_probability() {
        let loss = CrossEntropyLoss::loss(0, &[0.0, 1.0]);
        assert_relative_eq!(loss, -(1e-6f64).ln());
    }

    #[test]
    fn out_of_range_label_is_zero_loss() {
        assert_eq!(CrossEntropyLoss::loss(3, &[0.2, 0.3, 0.5]), 0.0);
        assert_eq!(CrossEntropyLoss::loss(0, &[]), 0.0);
    }

    #[test]
    fn derivative_subtracts_one_hot() {
        let grad = CrossEntropyLoss::derivative(1, &[0.2, 0.7, 0.1]);
        assert_relative_eq!(grad[0], 0.2);
        assert_relative_eq!(grad[1], -0.3, epsilon = 1e-12);
        assert_relative_eq!(grad[2], 0.1);
    }
}
