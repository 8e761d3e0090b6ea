//! Quadratic Swarm CLI: run PSO on a quadratic and report convergence

use anyhow::Context;
use clap::Parser;
use quadratic_swarm::RunConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "quadratic-swarm", version, about = "Particle Swarm Optimization of a quadratic")]
struct Cli {
    /// YAML or JSON run configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of particles
    #[arg(long)]
    particles: Option<usize>,

    /// Number of iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Inertia weight (w)
    #[arg(long)]
    inertia: Option<f64>,

    /// Cognitive coefficient
    #[arg(long)]
    c1: Option<f64>,

    /// Social coefficient
    #[arg(long)]
    c2: Option<f64>,

    /// Lower bound of the search interval
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<f64>,

    /// Upper bound of the search interval
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<f64>,

    /// Quadratic coefficient of a*x^2 + b*x + c
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    a: Option<f64>,

    /// Linear coefficient of a*x^2 + b*x + c
    #[arg(short = 'b', long, allow_hyphen_values = true)]
    b: Option<f64>,

    /// Constant term of a*x^2 + b*x + c
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    c: Option<f64>,

    /// Random seed (default 42)
    #[arg(long, env = "QUADRATIC_SWARM_SEED")]
    seed: Option<u64>,

    /// Write the result and configuration as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip the convergence chart
    #[arg(long)]
    no_chart: bool,

    /// Chart width in columns
    #[arg(long, default_value_t = 60)]
    width: usize,

    /// Chart height in rows
    #[arg(long, default_value_t = 15)]
    height: usize,
}

impl Cli {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => RunConfig::default(),
        };

        let swarm = &mut config.swarm;
        if let Some(v) = self.particles {
            swarm.particle_count = v;
        }
        if let Some(v) = self.iterations {
            swarm.iteration_count = v;
        }
        if let Some(v) = self.inertia {
            swarm.inertia_weight = v;
        }
        if let Some(v) = self.c1 {
            swarm.cognitive = v;
        }
        if let Some(v) = self.c2 {
            swarm.social = v;
        }
        if let Some(v) = self.lower {
            swarm.bounds.low = v;
        }
        if let Some(v) = self.upper {
            swarm.bounds.high = v;
        }

        let objective = &mut config.objective;
        if let Some(v) = self.a {
            objective.a = v;
        }
        if let Some(v) = self.b {
            objective.b = v;
        }
        if let Some(v) = self.c {
            objective.c = v;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();
    swarm_optimization::init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.run_config()?;
    info!(seed = config.seed, "Quadratic Swarm v{}", quadratic_swarm::version());

    let report = quadratic_swarm::run(config)?;

    println!("{}", report.summary());
    info!(
        minimizer = report.analytic_minimizer(),
        error = report.position_error(),
        "Distance from the analytic minimizer"
    );
    if !cli.no_chart {
        println!();
        print!("{}", report.render_chart(cli.width, cli.height));
    }

    if let Some(path) = &cli.json {
        let json = report.to_json()?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}
