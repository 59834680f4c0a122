use super::models::{GenerationSummary, Outcome, format_parameters};
use super::{Error, MinimizerBuilder};
use crate::models::{
    Conclusion, Convergence, ConvergenceDecision, Objective, Population, Species,
    StoppingCriteria, Terminated,
};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::instrument;
use uuid::Uuid;

/// Minimizes an objective over a bounded box.
///
/// The configuration is fixed at build time. Every call to
/// [`Minimizer::minimize`] starts from a fresh population and run state.
pub struct Minimizer<O> {
    pub(super) objective: O,
    pub(super) species: Species,
    pub(super) stopping_criteria: StoppingCriteria,
    pub(super) verbose: bool,
    pub(super) seed: Option<u64>,
    pub(super) terminated: Box<dyn Terminated>,
}

impl<O: Objective> Minimizer<O> {
    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn stopping_criteria(&self) -> &StoppingCriteria {
        &self.stopping_criteria
    }

    /// Runs the search with the configured seed, or a random one.
    pub fn minimize(&self) -> Result<Outcome, Error> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.minimize_with_rng(&mut rng)
    }

    /// Runs the search drawing every random decision from `rng`.
    #[instrument(level = "info", skip(self, rng), fields(run_id = tracing::field::Empty, n_pars = self.species.morphology().len(), max_iterations = self.stopping_criteria.max_iterations))]
    pub fn minimize_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Outcome, Error> {
        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        tracing::info!("Minimization started");

        let mut population = Population::new(self.species.clone());
        population.initialize(&self.objective, rng)?;

        let mut convergence = Convergence::new(&self.stopping_criteria);
        let initial_best = population.best()?;
        convergence.record_best(initial_best.decode(), initial_best.fitness());
        let mut last_generation_parameters = initial_best.decode().to_vec();

        let mut history = Vec::new();
        let mut generations = 0;

        let conclusion = loop {
            if convergence.is_exhausted() {
                break Conclusion::MaxIterationsReached;
            }
            if self.terminated.is_terminated() {
                tracing::info!(generations, "Minimization interrupted");
                break Conclusion::Interrupted;
            }

            population.advance_generation(&self.objective, convergence.progress(), rng)?;
            generations += 1;

            let best = population.best()?;
            let parameters = best.decode();
            convergence.record_best(parameters, best.fitness());
            history.push(GenerationSummary {
                generation: population.generation(),
                best_fitness: best.fitness(),
            });
            last_generation_parameters.clear();
            last_generation_parameters.extend_from_slice(parameters);

            let iteration = convergence.current_iteration();
            if convergence.observe(parameters) == ConvergenceDecision::Converged {
                break Conclusion::Converged;
            }

            if self.verbose {
                tracing::info!(
                    iteration,
                    fitness = ?best.fitness(),
                    "{iteration:4}\t{}",
                    format_parameters(parameters)
                );
            } else {
                tracing::debug!(iteration, fitness = ?best.fitness(), "Generation completed");
            }
        };

        if conclusion == Conclusion::MaxIterationsReached {
            tracing::warn!(
                max_iterations = self.stopping_criteria.max_iterations,
                "Minimization stopped at max_iterations without converging"
            );
        }

        let parameters = convergence
            .best_parameters()
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| last_generation_parameters.clone());
        let fitness = convergence.best_fitness();

        tracing::info!(
            generations,
            conclusion = ?conclusion,
            fitness = ?fitness,
            "Minimization concluded"
        );

        Ok(Outcome {
            run_id,
            parameters,
            fitness,
            last_generation_parameters,
            generations,
            conclusion,
            started_at,
            concluded_at: Utc::now(),
            history,
        })
    }
}

/// Minimizes `objective` over `n_pars` parameters in `[low, high]` with every
/// other setting at its default.
///
/// ```rust
/// use fx_ga_minimize::{minimize, models::infallible};
///
/// let outcome = minimize(1, infallible(|p: &[f64]| p[0] * p[0]), (-1.0, 1.0))?;
/// assert!(outcome.parameters[0].abs() < 1e-2);
/// # Ok::<(), fx_ga_minimize::Error>(())
/// ```
pub fn minimize<O: Objective>(
    n_pars: usize,
    objective: O,
    (low, high): (f64, f64),
) -> Result<Outcome, Error> {
    MinimizerBuilder::new()
        .dimensions(n_pars)
        .objective(objective)
        .with_bounds(low, high)
        .build()?
        .minimize()
}
