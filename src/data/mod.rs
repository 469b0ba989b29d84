pub mod sample;

pub use sample::{Dataset, Sample};
