pub mod network;
pub mod spec;
pub mod topology;

pub use network::{Network, DEFAULT_SEED};
pub use spec::NetworkSpec;
pub use topology::{Topology, INPUT_SIZE};
