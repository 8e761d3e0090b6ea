use crate::error::{OptimizationError, SwarmResult};
use serde::{Deserialize, Serialize};

/// Closed interval the particles are confined to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.low, self.high)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(-10.0, 10.0)
    }
}

/// Configuration for a swarm run. Fixed for the whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub particle_count: usize,
    pub iteration_count: usize,
    /// Inertia weight (w)
    pub inertia_weight: f64,
    /// Cognitive weight (c1, pull towards pbest)
    pub cognitive: f64,
    /// Social weight (c2, pull towards gbest)
    pub social: f64,
    pub bounds: Bounds,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            particle_count: 10,
            iteration_count: 50,
            inertia_weight: 0.5,
            cognitive: 1.5,
            social: 1.5,
            bounds: Bounds::default(),
        }
    }
}

impl SwarmConfig {
    /// Checks the configuration before any particle is created.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.particle_count < 1 {
            return Err(OptimizationError::InvalidConfiguration(
                "particle_count must be at least 1".to_string(),
            ));
        }
        if self.iteration_count < 1 {
            return Err(OptimizationError::InvalidConfiguration(
                "iteration_count must be at least 1".to_string(),
            ));
        }
        let Bounds { low, high } = self.bounds;
        if !low.is_finite() || !high.is_finite() {
            return Err(OptimizationError::InvalidConfiguration(format!(
                "bounds must be finite, got [{}, {}]",
                low, high
            )));
        }
        if low >= high {
            return Err(OptimizationError::InvalidConfiguration(format!(
                "lower bound {} must be below upper bound {}",
                low, high
            )));
        }
        if !(high - low).is_finite() {
            return Err(OptimizationError::InvalidConfiguration(format!(
                "bounds span overflows: [{}, {}]",
                low, high
            )));
        }
        for (name, value) in [
            ("inertia_weight", self.inertia_weight),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(OptimizationError::InvalidConfiguration(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// A single member of the swarm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: f64,
    pub velocity: f64,
    pub best_position: f64,
    pub best_value: f64,
}

impl Particle {
    pub fn new(position: f64, velocity: f64, value: f64) -> Self {
        Self {
            position,
            velocity,
            best_position: position,
            best_value: value,
        }
    }
}

/// Best personal best found across the swarm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalBest {
    /// Index of the particle holding this best
    pub index: usize,
    pub position: f64,
    pub value: f64,
}

impl GlobalBest {
    /// Lowest personal best in scan order; the first particle wins ties.
    /// Returns `None` for an empty swarm.
    pub fn of(particles: &[Particle]) -> Option<Self> {
        let mut best: Option<Self> = None;
        for (index, p) in particles.iter().enumerate() {
            let better = match best {
                Some(b) => p.best_value < b.value,
                None => true,
            };
            if better {
                best = Some(Self {
                    index,
                    position: p.best_position,
                    value: p.best_value,
                });
            }
        }
        best
    }
}

/// Mutable state of a run: the swarm, its global best and the history of
/// global best values (one entry per completed iteration).
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmState {
    pub particles: Vec<Particle>,
    pub global_best: GlobalBest,
    pub history: Vec<f64>,
}

impl SwarmState {
    pub fn iterations_completed(&self) -> usize {
        self.history.len()
    }
}

/// The result of an optimization run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub best_position: f64,
    pub best_value: f64,
    pub history: Vec<f64>,
}

impl From<SwarmState> for OptimizationResult {
    fn from(state: SwarmState) -> Self {
        Self {
            best_position: state.global_best.position,
            best_value: state.global_best.value,
            history: state.history,
        }
    }
}

/// Defines the function being minimized.
pub trait Objective {
    /// The objective value at `x`. An `Err` aborts the run.
    fn evaluate(&self, x: f64) -> anyhow::Result<f64>;
}

/// A simple objective defined by a closure.
pub struct SimpleObjective<F>
where
    F: Fn(f64) -> f64,
{
    pub objective_func: F,
}

impl<F> SimpleObjective<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(objective_func: F) -> Self {
        Self { objective_func }
    }
}

impl<F> Objective for SimpleObjective<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> anyhow::Result<f64> {
        Ok((self.objective_func)(x))
    }
}

/// `a*x^2 + b*x + c`. The default is `x^2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Analytic minimizer on `bounds`, used to judge how close a run got.
    pub fn minimizer(&self, bounds: &Bounds) -> f64 {
        let at = |x: f64| self.a * x * x + self.b * x + self.c;
        let mut best = bounds.low;
        let mut candidates = vec![bounds.high];
        if self.a > 0.0 {
            candidates.push(bounds.clamp(-self.b / (2.0 * self.a)));
        }
        for x in candidates {
            if at(x) < at(best) {
                best = x;
            }
        }
        best
    }
}

impl Default for Quadratic {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl Objective for Quadratic {
    fn evaluate(&self, x: f64) -> anyhow::Result<f64> {
        Ok(self.a * x * x + self.b * x + self.c)
    }
}

/// Evaluates `objective` and rejects errors and non-finite values.
pub(crate) fn evaluate_checked<O: Objective + ?Sized>(objective: &O, x: f64) -> SwarmResult<f64> {
    match objective.evaluate(x) {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(OptimizationError::ObjectiveEvaluation {
            position: x,
            reason: format!("non-finite value {}", value),
        }),
        Err(e) => Err(OptimizationError::ObjectiveEvaluation {
            position: x,
            reason: e.to_string(),
        }),
    }
}
