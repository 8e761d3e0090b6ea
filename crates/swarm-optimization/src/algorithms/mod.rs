pub mod pso;

pub use pso::{initialize, run, step, PsoSolver};
