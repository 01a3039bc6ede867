pub mod normalizer;
pub mod rebalancer;
pub mod verifier;

pub use normalizer::{normalize, Style};
pub use rebalancer::SlotRebalancer;
pub use verifier::{verify, MarkerSource, MismatchReport};
