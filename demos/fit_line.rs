//! # Line Fitting Example
//!
//! Fits `y = a * x + b` to noisy samples by minimizing the sum of squared
//! residuals. The samples are passed to the objective as fixed extra
//! arguments, and the optimizer is configured from a JSON settings document.

use anyhow::Result;
use fx_ga_minimize::{Settings, bootstrap, models::with_args};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SETTINGS: &str = r#"{
    "bounds": [-10.0, 10.0],
    "schedule": { "initial_size": 20, "child_count": 80, "child_cull_count": 30, "elite_count": 5 },
    "stopping_criteria": { "stop_patience": 15, "absolute_tolerance": 1e-9 },
    "verbose": false,
    "seed": 7
}"#;

struct Samples {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Samples {
    fn generate(slope: f64, intercept: f64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(1);
        let xs: Vec<f64> = (0..count).map(|i| i as f64 * 0.5).collect();
        let ys = xs
            .iter()
            .map(|x| slope * x + intercept + rng.random_range(-0.1..0.1))
            .collect();

        Self { xs, ys }
    }
}

fn squared_residuals(parameters: &[f64], samples: &Samples) -> Result<f64> {
    let [slope, intercept] = parameters else {
        anyhow::bail!("expected 2 parameters, got {}", parameters.len());
    };

    Ok(samples
        .xs
        .iter()
        .zip(&samples.ys)
        .map(|(x, y)| (slope * x + intercept - y).powi(2))
        .sum())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let settings = Settings::from_json(SETTINGS)?;
    let samples = Samples::generate(1.7, -0.4, 40);

    let outcome = bootstrap(settings)
        .dimensions(2)
        .objective(with_args(squared_residuals, samples))
        .build()?
        .minimize()?;

    println!(
        "slope = {:.4}, intercept = {:.4} ({:?}, {} generations, run {})",
        outcome.parameters[0],
        outcome.parameters[1],
        outcome.conclusion,
        outcome.generations,
        outcome.run_id,
    );
    println!("{}", serde_json::to_string_pretty(&outcome.history.last())?);

    Ok(())
}
