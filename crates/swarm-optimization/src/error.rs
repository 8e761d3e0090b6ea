//! Error types for the swarm optimizer

use thiserror::Error;

/// Errors raised while setting up or running a swarm
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    /// Particle/iteration counts, bounds or coefficients are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The objective failed or produced a non-finite value
    #[error("Objective evaluation failed at x = {position}: {reason}")]
    ObjectiveEvaluation { position: f64, reason: String },
}

pub type SwarmResult<T> = Result<T, OptimizationError>;
