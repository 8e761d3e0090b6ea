use crate::common::{
    evaluate_checked, GlobalBest, Objective, OptimizationResult, Particle, SwarmConfig, SwarmState,
};
use crate::error::{OptimizationError, SwarmResult};
use rand::prelude::*;
use tracing::{debug, info};

/// Creates the initial swarm.
///
/// Positions are drawn for the whole swarm first, then velocities, so a
/// seeded source always yields the same swarm.
pub fn initialize<O, R>(
    config: &SwarmConfig,
    objective: &O,
    rng: &mut R,
) -> SwarmResult<SwarmState>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let bounds = config.bounds;

    let positions: Vec<f64> = (0..config.particle_count)
        .map(|_| rng.gen_range(bounds.low..bounds.high))
        .collect();
    let velocities: Vec<f64> = (0..config.particle_count)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect();

    let particles = positions
        .into_iter()
        .zip(velocities)
        .map(|(x, v)| -> SwarmResult<Particle> {
            Ok(Particle::new(x, v, evaluate_checked(objective, x)?))
        })
        .collect::<SwarmResult<Vec<_>>>()?;

    let global_best = GlobalBest::of(&particles).ok_or_else(|| {
        OptimizationError::InvalidConfiguration("swarm has no particles".to_string())
    })?;

    Ok(SwarmState {
        particles,
        global_best,
        history: Vec::with_capacity(config.iteration_count),
    })
}

/// Runs one iteration over the swarm in index order.
///
/// Every velocity update reads the global best from the previous
/// iteration; it is only recomputed once the whole sweep is done.
pub fn step<O, R>(
    state: &mut SwarmState,
    config: &SwarmConfig,
    objective: &O,
    rng: &mut R,
) -> SwarmResult<()>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let gbest = state.global_best.position;
    let bounds = config.bounds;

    for particle in state.particles.iter_mut() {
        let r1: f64 = rng.gen();
        let r2: f64 = rng.gen();

        particle.velocity = config.inertia_weight * particle.velocity
            + config.cognitive * r1 * (particle.best_position - particle.position)
            + config.social * r2 * (gbest - particle.position);

        particle.position = bounds.clamp(particle.position + particle.velocity);

        let value = evaluate_checked(objective, particle.position)?;
        if value < particle.best_value {
            particle.best_position = particle.position;
            particle.best_value = value;
        }
    }

    if let Some(best) = GlobalBest::of(&state.particles) {
        state.global_best = best;
    }
    state.history.push(state.global_best.value);
    Ok(())
}

/// Initializes a swarm and runs exactly `iteration_count` iterations.
pub fn run<O, R>(
    config: &SwarmConfig,
    objective: &O,
    rng: &mut R,
) -> SwarmResult<OptimizationResult>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    let mut state = initialize(config, objective, rng)?;
    info!(
        particles = config.particle_count,
        iterations = config.iteration_count,
        initial_best = state.global_best.value,
        "PSO run started"
    );

    for iter in 0..config.iteration_count {
        step(&mut state, config, objective, rng)?;
        debug!(
            iteration = iter + 1,
            best_value = state.global_best.value,
            best_position = state.global_best.position,
            "PSO iteration complete"
        );
    }

    info!(
        best_value = state.global_best.value,
        best_position = state.global_best.position,
        "PSO run finished"
    );
    Ok(state.into())
}

pub struct PsoSolver {
    pub config: SwarmConfig,
}

impl PsoSolver {
    pub fn new(config: SwarmConfig) -> Self {
        Self { config }
    }

    pub fn solve<O, R>(&self, objective: &O, rng: &mut R) -> SwarmResult<OptimizationResult>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        run(&self.config, objective, rng)
    }

    /// Same as [`PsoSolver::solve`] with a `StdRng` seeded from `seed`.
    pub fn solve_seeded<O>(&self, objective: &O, seed: u64) -> SwarmResult<OptimizationResult>
    where
        O: Objective + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        self.solve(objective, &mut rng)
    }
}

impl Default for PsoSolver {
    fn default() -> Self {
        Self::new(SwarmConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Bounds, Quadratic, SimpleObjective};

    fn particle(position: f64, value: f64) -> Particle {
        Particle::new(position, 0.0, value)
    }

    #[test]
    fn test_global_best_prefers_lowest_index_on_tie() {
        let particles = vec![particle(3.0, 4.0), particle(-1.0, 1.0), particle(1.0, 1.0)];
        let best = GlobalBest::of(&particles).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.position, -1.0);
        assert_eq!(best.value, 1.0);
    }

    #[test]
    fn test_global_best_of_empty_swarm() {
        assert!(GlobalBest::of(&[]).is_none());
    }

    #[test]
    fn test_constant_objective_keeps_first_particle() {
        let config = SwarmConfig::default();
        let objective = SimpleObjective::new(|_x| 7.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = initialize(&config, &objective, &mut rng).unwrap();
        assert_eq!(state.global_best.index, 0);

        step(&mut state, &config, &objective, &mut rng).unwrap();
        assert_eq!(state.global_best.index, 0);
        assert_eq!(state.history, vec![7.0]);
    }

    #[test]
    fn test_step_uses_previous_global_best() {
        // Particle 0 reaches the optimum during the sweep, but the others
        // must still be pulled towards the old global best at -1.
        let config = SwarmConfig {
            particle_count: 3,
            inertia_weight: 1.0,
            cognitive: 0.0,
            social: 1.0,
            ..SwarmConfig::default()
        };
        let objective = Quadratic::default();
        let mut state = SwarmState {
            particles: vec![
                Particle::new(-1.0, 1.0, 1.0),
                particle(5.0, 25.0),
                particle(6.0, 36.0),
            ],
            global_best: GlobalBest { index: 0, position: -1.0, value: 1.0 },
            history: Vec::new(),
        };

        let mut rng = StdRng::seed_from_u64(11);
        let mut replay = StdRng::seed_from_u64(11);
        step(&mut state, &config, &objective, &mut rng).unwrap();

        assert_eq!(state.particles[0].position, 0.0);
        assert_eq!(state.particles[0].best_value, 0.0);

        let _: (f64, f64) = (replay.gen(), replay.gen());
        for (i, start) in [(1, 5.0), (2, 6.0)] {
            let _r1: f64 = replay.gen();
            let r2: f64 = replay.gen();
            let expected = start + r2 * (-1.0 - start);
            assert_eq!(state.particles[i].position, expected);
        }

        assert_eq!(state.global_best.index, 0);
        assert_eq!(state.global_best.value, 0.0);
        assert_eq!(state.history, vec![0.0]);
    }

    #[test]
    fn test_personal_best_requires_strict_improvement() {
        let config = SwarmConfig {
            particle_count: 1,
            inertia_weight: 0.0,
            cognitive: 0.0,
            social: 0.0,
            ..SwarmConfig::default()
        };
        let objective = SimpleObjective::new(|_x| 1.0);
        let mut state = SwarmState {
            particles: vec![Particle {
                position: 4.0,
                velocity: 2.0,
                best_position: 3.0,
                best_value: 1.0,
            }],
            global_best: GlobalBest { index: 0, position: 3.0, value: 1.0 },
            history: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut state, &config, &objective, &mut rng).unwrap();

        // Zero coefficients freeze the particle; the equal value is not an improvement.
        assert_eq!(state.particles[0].position, 4.0);
        assert_eq!(state.particles[0].best_position, 3.0);
    }

    #[test]
    fn test_clamps_to_bounds() {
        let config = SwarmConfig {
            particle_count: 1,
            inertia_weight: 1.0,
            cognitive: 0.0,
            social: 0.0,
            bounds: Bounds::new(-1.0, 1.0),
            ..SwarmConfig::default()
        };
        let objective = Quadratic::default();
        let mut state = SwarmState {
            particles: vec![Particle::new(0.5, 100.0, 0.25)],
            global_best: GlobalBest { index: 0, position: 0.5, value: 0.25 },
            history: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        step(&mut state, &config, &objective, &mut rng).unwrap();

        assert_eq!(state.particles[0].position, 1.0);
        // velocity is left unclamped
        assert_eq!(state.particles[0].velocity, 100.0);
    }

    #[test]
    fn test_step_rejects_inverted_bounds() {
        let objective = Quadratic::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = initialize(&SwarmConfig::default(), &objective, &mut rng).unwrap();
        let before = state.clone();

        let config = SwarmConfig { bounds: Bounds::new(5.0, -5.0), ..SwarmConfig::default() };
        let err = step(&mut state, &config, &objective, &mut rng).unwrap_err();

        assert!(matches!(err, OptimizationError::InvalidConfiguration(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_step_rejects_nan_bound() {
        let objective = Quadratic::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = initialize(&SwarmConfig::default(), &objective, &mut rng).unwrap();

        let config = SwarmConfig { bounds: Bounds::new(f64::NAN, 1.0), ..SwarmConfig::default() };
        let err = step(&mut state, &config, &objective, &mut rng).unwrap_err();
        assert!(matches!(err, OptimizationError::InvalidConfiguration(_)));
        assert!(state.history.is_empty());
    }
}
