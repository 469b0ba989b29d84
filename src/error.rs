use thiserror::Error;

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Every failure the engine can report.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The topology or hyperparameters cannot produce a network.
    #[error("invalid network: {0}")]
    Validation(String),

    /// An input vector's length disagrees with a neuron's weight count.
    #[error("dimension mismatch: expected {expected} inputs, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// `predict` was handed an empty output vector.
    #[error("cannot predict from an empty output vector")]
    EmptyPrediction,

    /// Backpropagation needs a label; inference-only samples have none.
    #[error("sample has no label and cannot be trained on")]
    UnlabeledSample,

    /// An output logit overflowed or became NaN, usually after the weights
    /// diverged.
    #[error("output logit {index} is not finite")]
    NonFiniteOutput { index: usize },

    #[error("weight index {index} out of range for {len} weights")]
    WeightIndexOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
