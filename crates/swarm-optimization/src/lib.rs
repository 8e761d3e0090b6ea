pub mod algorithms;
pub mod common;
pub mod error;

/// Re-export common types
pub use algorithms::{initialize, run, step, PsoSolver};
pub use common::*;
pub use error::{OptimizationError, SwarmResult};

/// Initialize the optimization engine
pub fn init() {
    tracing::info!("Swarm Optimization Engine Initialized");
}
