pub mod driver;
pub mod epoch_stats;
pub mod evaluate;

pub use driver::{StepOutcome, TrainingDriver};
pub use epoch_stats::EpochStats;
pub use evaluate::test_pass;
