use fx_ga_minimize::{
    ConfigurationError, Error, MinimizerBuilder, Settings, bootstrap, minimize,
    models::{
        Conclusion, Crossover, Distribution, GeneBoundError, GeneBounds, Morphology, Mutagen,
        Population, PopulationError, Schedule, Selector, Species, StoppingCriteria, fallible,
        infallible, with_args,
    },
};
use rand::{SeedableRng, rngs::StdRng};
use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn shifted_paraboloid(p: &[f64]) -> f64 {
    (p[0] - 3.0).powi(2) + (p[1] + 2.0).powi(2)
}

fn sphere(p: &[f64]) -> f64 {
    p.iter().map(|x| x * x).sum()
}

#[test]
fn test_shifted_paraboloid_with_defaults() -> anyhow::Result<()> {
    let outcome = minimize(2, infallible(shifted_paraboloid), (-100.0, 100.0))?;

    assert!((outcome.parameters[0] - 3.0).abs() < 1e-3, "{:?}", outcome.parameters);
    assert!((outcome.parameters[1] + 2.0).abs() < 1e-3, "{:?}", outcome.parameters);
    Ok(())
}

#[test]
fn test_convex_objective_converges_over_several_seeds() -> anyhow::Result<()> {
    for seed in 1..=5 {
        let outcome = MinimizerBuilder::new()
            .dimensions(3)
            .objective(infallible(|p: &[f64]| {
                (p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2) + (p[2] + 4.0).powi(2)
            }))
            .with_bounds(-10.0, 10.0)
            .with_seed(seed)
            .build()?
            .minimize()?;

        let expected = [1.0, 2.0, -4.0];
        for (parameter, expected) in outcome.parameters.iter().zip(expected) {
            assert!((parameter - expected).abs() < 1e-3, "seed {seed}: {:?}", outcome.parameters);
        }
    }
    Ok(())
}

#[test]
fn test_single_parameter_converges_near_zero() -> anyhow::Result<()> {
    let outcome = minimize(1, infallible(|p: &[f64]| p[0] * p[0]), (-1.0, 1.0))?;

    assert_eq!(outcome.parameters.len(), 1);
    assert!(outcome.parameters[0].abs() < 1e-6, "{:?}", outcome.parameters);
    Ok(())
}

#[test]
fn test_parameters_stay_inside_the_bounds() -> anyhow::Result<()> {
    // Pushes towards the upper, then the lower corner of the box
    for direction in [-1.0, 1.0] {
        let outcome = MinimizerBuilder::new()
            .dimensions(4)
            .objective(infallible(move |p: &[f64]| direction * p.iter().sum::<f64>()))
            .with_bounds(-2.0, 3.0)
            .with_max_iterations(200)
            .with_seed(17)
            .build()?
            .minimize()?;

        for parameter in outcome.parameters.iter().chain(&outcome.last_generation_parameters) {
            assert!((-2.0..=3.0).contains(parameter), "{parameter}");
        }
    }
    Ok(())
}

#[test]
fn test_per_parameter_bounds_are_respected() -> anyhow::Result<()> {
    let outcome = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(sphere))
        .with_gene_bounds(vec![GeneBounds::new(1.0, 2.0)?, GeneBounds::new(-5.0, -4.0)?])
        .with_seed(3)
        .build()?
        .minimize()?;

    assert!((outcome.parameters[0] - 1.0).abs() < 1e-6);
    assert!((outcome.parameters[1] + 4.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_same_seed_reproduces_the_run() -> anyhow::Result<()> {
    let run = || {
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(infallible(shifted_paraboloid))
            .with_selector(Selector::tournament(3).unwrap())
            .with_distribution(Distribution::latin_hypercube())
            .with_max_iterations(300)
            .with_seed(2024)
            .build()?
            .minimize()
    };

    let first = run()?;
    let second = run()?;

    assert_eq!(first.history, second.history);
    assert_eq!(first.parameters, second.parameters);
    assert_eq!(first.last_generation_parameters, second.last_generation_parameters);
    assert_eq!(first.generations, second.generations);
    Ok(())
}

#[test]
fn test_constant_objective_converges_after_patience() -> anyhow::Result<()> {
    let min_iterations = 20;
    let stop_patience = 5;

    let outcome = MinimizerBuilder::new()
        .dimensions(3)
        .objective(infallible(|_: &[f64]| 1.0))
        .with_min_iterations(min_iterations)
        .with_stop_patience(stop_patience)
        .with_seed(8)
        .build()?
        .minimize()?;

    assert_eq!(outcome.conclusion, Conclusion::Converged);
    assert_eq!(outcome.generations, min_iterations + stop_patience + 2);
    assert_eq!(outcome.parameters, outcome.last_generation_parameters);
    Ok(())
}

#[test]
fn test_constant_objective_with_default_criteria() -> anyhow::Result<()> {
    let outcome = minimize(2, infallible(|_: &[f64]| 0.0), (-100.0, 100.0))?;

    assert!(outcome.is_converged());
    assert_eq!(outcome.generations, 100 + 10 + 2);
    Ok(())
}

#[test]
fn test_max_below_min_runs_every_iteration() -> anyhow::Result<()> {
    let outcome = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(|_: &[f64]| 1.0))
        .with_min_iterations(50)
        .with_max_iterations(30)
        .with_seed(4)
        .build()?
        .minimize()?;

    assert_eq!(outcome.conclusion, Conclusion::MaxIterationsReached);
    assert_eq!(outcome.generations, 30);
    assert_eq!(outcome.history.len(), 30);
    Ok(())
}

#[test]
fn test_configuration_errors_precede_evaluation() {
    let calls = Cell::new(0);
    let counter = &calls;
    let objective = move || {
        infallible(move |p: &[f64]| {
            counter.set(counter.get() + 1);
            sphere(p)
        })
    };

    let results = [
        MinimizerBuilder::new()
            .dimensions(0)
            .objective(objective())
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_bounds(5.0, -5.0)
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_bounds(f64::NEG_INFINITY, 0.0)
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_schedule(Schedule {
                initial_size: 2,
                child_count: 10,
                child_cull_count: 20,
                elite_count: 1,
            })
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_absolute_tolerance(0.0)
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_selector(Selector::Tournament { size: 0 })
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective())
            .with_crossover(Crossover::Uniform { probability: 1.5 })
            .build()
            .err(),
        MinimizerBuilder::new()
            .dimensions(3)
            .objective(objective())
            .with_gene_bounds(vec![GeneBounds::new(0.0, 1.0).unwrap()])
            .build()
            .err(),
    ];

    for result in results {
        assert!(
            matches!(result, Some(Error::ConfigurationError(_))),
            "{result:?}"
        );
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_zero_dimensions_is_named() {
    let result = MinimizerBuilder::new()
        .dimensions(0)
        .objective(infallible(sphere))
        .build();

    assert!(matches!(
        result,
        Err(Error::ConfigurationError(ConfigurationError::ZeroDimensions))
    ));
}

#[test]
fn test_objective_errors_propagate() -> anyhow::Result<()> {
    let calls = Cell::new(0);
    let minimizer = MinimizerBuilder::new()
        .dimensions(2)
        .objective(fallible(|p| {
            calls.set(calls.get() + 1);
            if calls.get() > 30 {
                anyhow::bail!("model diverged");
            }
            Ok(sphere(p))
        }))
        .with_seed(6)
        .build()?;

    let result = minimizer.minimize();

    match result {
        Err(Error::EvaluationError(err)) => assert_eq!(err.to_string(), "model diverged"),
        other => panic!("expected an evaluation error, got {other:?}"),
    }
    assert_eq!(calls.get(), 31);
    Ok(())
}

#[test]
fn test_cancellation_before_the_run() -> anyhow::Result<()> {
    let calls = Cell::new(0);
    let outcome = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(|p: &[f64]| {
            calls.set(calls.get() + 1);
            sphere(p)
        }))
        .with_terminated(Arc::new(AtomicBool::new(true)))
        .build()?
        .minimize()?;

    assert_eq!(outcome.conclusion, Conclusion::Interrupted);
    assert_eq!(outcome.generations, 0);
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn test_cancellation_between_generations() -> anyhow::Result<()> {
    let flag = Arc::new(AtomicBool::new(false));
    let raise_at = flag.clone();
    let calls = Cell::new(0);

    let outcome = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(|p: &[f64]| {
            calls.set(calls.get() + 1);
            // Two initial members, then fifty children per generation
            if calls.get() == 2 + 50 + 25 {
                raise_at.store(true, Ordering::Relaxed);
            }
            sphere(p)
        }))
        .with_terminated(flag)
        .with_seed(12)
        .build()?
        .minimize()?;

    assert_eq!(outcome.conclusion, Conclusion::Interrupted);
    assert_eq!(outcome.generations, 2);
    assert_eq!(calls.get(), 2 + 50 + 50);
    Ok(())
}

#[test]
fn test_best_ever_parameters_are_returned() -> anyhow::Result<()> {
    // Without elitism the fittest member can be culled in later generations
    let outcome = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(shifted_paraboloid))
        .with_schedule(Schedule::new(10, 20, 10, 0)?)
        .with_selector(Selector::uniform())
        .with_crossover(Crossover::uniform(0.5)?)
        .with_mutagen(Mutagen::constant(0.9, 0.5)?)
        .with_max_iterations(60)
        .with_seed(21)
        .build()?
        .minimize()?;

    let best_fitness = outcome.fitness.expect("the objective always returns a number");
    let best_of_history = outcome
        .history
        .iter()
        .filter_map(|summary| summary.best_fitness)
        .fold(f64::INFINITY, f64::min);

    assert_eq!(best_fitness, shifted_paraboloid(&outcome.parameters));
    assert!(best_fitness <= best_of_history);
    assert!(best_fitness <= shifted_paraboloid(&outcome.last_generation_parameters));
    Ok(())
}

#[test]
fn test_extra_arguments_reach_the_objective() -> anyhow::Result<()> {
    let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 1.0).collect();

    // The valley of this objective runs diagonally, so a population that has
    // gathered on it can only refine with small steps.
    for seed in [99, 1, 2, 3, 4, 5, 6, 7] {
        let objective = with_args(
            |p: &[f64], (xs, ys): &(Vec<f64>, Vec<f64>)| {
                Ok(xs
                    .iter()
                    .zip(ys)
                    .map(|(x, y)| (p[0] * x + p[1] - y).powi(2))
                    .sum())
            },
            (xs.clone(), ys.clone()),
        );

        let outcome = MinimizerBuilder::new()
            .dimensions(2)
            .objective(objective)
            .with_bounds(-10.0, 10.0)
            .with_seed(seed)
            .build()?
            .minimize()?;

        assert!(outcome.is_converged(), "seed {seed}: {:?}", outcome.conclusion);
        assert!(
            (outcome.parameters[0] - 2.0).abs() < 1e-3,
            "seed {seed}: {:?}",
            outcome.parameters
        );
        assert!(
            (outcome.parameters[1] + 1.0).abs() < 1e-3,
            "seed {seed}: {:?}",
            outcome.parameters
        );
    }
    Ok(())
}

#[test]
fn test_bounds_are_validated_from_every_source() -> anyhow::Result<()> {
    let inverted = serde_json::from_str::<GeneBounds>(r#"{ "lower": 5.0, "upper": -5.0 }"#);
    assert!(inverted.is_err());

    let settings = Settings::from_json(r#"{ "bounds": [5.0, -5.0] }"#)?;
    let result = bootstrap(settings).dimensions(2).objective(infallible(sphere)).build();
    assert!(matches!(
        result,
        Err(Error::ConfigurationError(ConfigurationError::GeneBounds(_)))
    ));

    let result = MinimizerBuilder::new()
        .dimensions(2)
        .objective(infallible(sphere))
        .with_bounds(-1e308, 1e308)
        .build();
    assert!(matches!(
        result,
        Err(Error::ConfigurationError(ConfigurationError::GeneBounds(
            GeneBoundError::RangeOverflow { .. }
        )))
    ));
    Ok(())
}

#[test]
fn test_settings_document_drives_the_run() -> anyhow::Result<()> {
    let settings = Settings::from_json(
        r#"{
            "bounds": [-10.0, 10.0],
            "selector": "Roulette",
            "stopping_criteria": { "min_iterations": 10, "max_iterations": 40 },
            "seed": 5
        }"#,
    )?;
    assert_eq!(
        settings.stopping_criteria,
        StoppingCriteria::new(10, 1e-10, 10, 40)?
    );

    let outcome = bootstrap(settings)
        .dimensions(2)
        .objective(infallible(sphere))
        .build()?
        .minimize()?;

    assert!(outcome.generations <= 40);
    assert!(outcome.parameters.iter().all(|p| (-10.0..=10.0).contains(p)));
    Ok(())
}

#[test]
fn test_species_compare_by_value() -> anyhow::Result<()> {
    let morphology = Morphology::uniform(2, GeneBounds::new(-1.0, 1.0)?)?;
    let species = Species::new(morphology.clone());

    let restored: Species = serde_json::from_str(&serde_json::to_string(&species)?)?;
    assert_eq!(restored, species);
    assert_ne!(
        species,
        Species::new(morphology).with_crossover(Crossover::uniform(0.5)?)
    );
    Ok(())
}

#[test]
fn test_population_refuses_an_invalid_species() -> anyhow::Result<()> {
    let calls = Cell::new(0);
    let objective = infallible(|p: &[f64]| {
        calls.set(calls.get() + 1);
        sphere(p)
    });

    let morphology = Morphology::uniform(2, GeneBounds::new(-1.0, 1.0)?)?;
    let mut document = serde_json::to_value(Species::new(morphology))?;
    document["morphology"]["gene_bounds"] = serde_json::json!([]);
    let mut population = Population::new(serde_json::from_value(document)?);

    let result = population.initialize(&objective, &mut StdRng::seed_from_u64(3));

    assert!(matches!(result, Err(PopulationError::Species(_))));
    assert!(population.is_empty());
    assert_eq!(calls.get(), 0);
    Ok(())
}
