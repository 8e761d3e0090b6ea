//! Quadratic Swarm
//!
//! Minimizes a one-dimensional quadratic with Particle Swarm Optimization and
//! reports how the swarm converged.
//!
//! The optimizer itself lives in the `swarm-optimization` crate; this crate
//! adds run configuration (YAML/JSON files, seeding) and reporting (text
//! summary, convergence chart, JSON export).
//!
//! # Example
//!
//! ```
//! use quadratic_swarm::{run, RunConfig};
//!
//! let report = run(RunConfig::default()).unwrap();
//! assert_eq!(report.result.history.len(), 50);
//! println!("{}", report.summary());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod report;

pub use config::{ConfigError, RunConfig, DEFAULT_SEED};
pub use report::Report;

use swarm_optimization::{PsoSolver, SwarmResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

/// Runs the configured swarm with a source seeded from `config.seed`.
pub fn run(config: RunConfig) -> SwarmResult<Report> {
    let solver = PsoSolver::new(config.swarm.clone());
    let result = solver.solve_seeded(&config.objective, config.seed)?;
    Ok(Report::new(config, result))
}
