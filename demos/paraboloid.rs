//! # Paraboloid Example
//!
//! Minimizes `f(x, y) = (x - 3)^2 + (y + 2)^2` over `[-100, 100]^2` and prints
//! the best parameters found. Run with `RUST_LOG=debug` to see every
//! generation, or pass `--verbose` for one progress line per generation.

use anyhow::Result;
use fx_ga_minimize::{
    MinimizerBuilder,
    models::{Distribution, Selector, infallible},
};
use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn paraboloid(parameters: &[f64]) -> f64 {
    (parameters[0] - 3.0).powi(2) + (parameters[1] + 2.0).powi(2)
}

fn main() -> Result<()> {
    // Initialize logging to see optimization progress
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let verbose = env::args().any(|arg| arg == "--verbose");

    // Gives up after five seconds; the run stops at the next generation
    let stop = Arc::new(AtomicBool::new(false));
    let timer = stop.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(5));
        timer.store(true, Ordering::Relaxed);
    });

    let minimizer = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(paraboloid))
        .with_bounds(-100.0, 100.0)
        .with_selector(Selector::tournament(3)?)
        .with_distribution(Distribution::latin_hypercube())
        .with_verbose(verbose)
        .with_terminated(stop)
        .build()?;

    let outcome = minimizer.minimize()?;

    println!(
        "{:?} after {} generations: x = {:.9}, y = {:.9}, f = {:e}",
        outcome.conclusion,
        outcome.generations,
        outcome.parameters[0],
        outcome.parameters[1],
        outcome.fitness.unwrap_or(f64::NAN),
    );

    Ok(())
}
