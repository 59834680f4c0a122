use crate::models::Gene;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// When a run stops.
///
/// A run stops after `max_iterations` generations, or earlier once the best
/// parameters moved less than `absolute_tolerance` (in every component) for
/// more than `stop_patience` consecutive generations. Stability is only
/// checked after `min_iterations` generations.
///
/// ```rust
/// use fx_ga_minimize::models::StoppingCriteria;
///
/// let criteria = StoppingCriteria::new(10, 1e-10, 100, 5000)?;
/// assert_eq!(criteria, StoppingCriteria::default());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoppingCriteria {
    pub stop_patience: u32,
    pub absolute_tolerance: f64,
    pub min_iterations: u32,
    pub max_iterations: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("absolute_tolerance must be finite and positive, got {0}")]
pub struct ToleranceOutOfRange(f64);

impl Default for StoppingCriteria {
    fn default() -> Self {
        Self {
            stop_patience: 10,
            absolute_tolerance: 1e-10,
            min_iterations: 100,
            max_iterations: 5000,
        }
    }
}

impl StoppingCriteria {
    pub fn new(
        stop_patience: u32,
        absolute_tolerance: f64,
        min_iterations: u32,
        max_iterations: u32,
    ) -> Result<Self, ToleranceOutOfRange> {
        let criteria = Self {
            stop_patience,
            absolute_tolerance,
            min_iterations,
            max_iterations,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub(crate) fn validate(&self) -> Result<(), ToleranceOutOfRange> {
        if !self.absolute_tolerance.is_finite() || self.absolute_tolerance <= 0.0 {
            return Err(ToleranceOutOfRange(self.absolute_tolerance));
        }

        Ok(())
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    /// The best parameters stayed stable for long enough.
    Converged,
    /// `max_iterations` generations ran without converging.
    MaxIterationsReached,
    /// The cancellation signal was raised.
    Interrupted,
}

/// Outcome of observing one generation.
#[derive(Debug, PartialEq)]
pub(crate) enum ConvergenceDecision {
    Continue,
    Converged,
}

/// Run state of one minimization.
#[derive(Debug)]
pub(crate) struct Convergence<'a> {
    criteria: &'a StoppingCriteria,
    previous_parameters: Option<Vec<Gene>>,
    current_iteration: u32,
    consecutive_stable_iterations: u32,
    best_parameters: Option<Vec<Gene>>,
    best_fitness: Option<f64>,
}

impl<'a> Convergence<'a> {
    pub(crate) fn new(criteria: &'a StoppingCriteria) -> Self {
        Self {
            criteria,
            previous_parameters: None,
            current_iteration: 0,
            consecutive_stable_iterations: 0,
            best_parameters: None,
            best_fitness: None,
        }
    }

    pub(crate) fn current_iteration(&self) -> u32 {
        self.current_iteration
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.current_iteration >= self.criteria.max_iterations
    }

    /// Fraction of the iteration budget used so far.
    pub(crate) fn progress(&self) -> f64 {
        if self.criteria.max_iterations == 0 {
            return 1.0;
        }
        f64::from(self.current_iteration) / f64::from(self.criteria.max_iterations)
    }

    /// Keeps the parameters if they beat every fitness recorded so far.
    pub(crate) fn record_best(&mut self, parameters: &[Gene], fitness: Option<f64>) {
        let Some(fitness) = fitness.filter(|fitness| !fitness.is_nan()) else {
            if self.best_parameters.is_none() {
                self.best_parameters = Some(parameters.to_vec());
            }
            return;
        };

        if self.best_fitness.is_none_or(|best| fitness < best) {
            self.best_parameters = Some(parameters.to_vec());
            self.best_fitness = Some(fitness);
        }
    }

    pub(crate) fn best_parameters(&self) -> Option<&[Gene]> {
        self.best_parameters.as_deref()
    }

    pub(crate) fn best_fitness(&self) -> Option<f64> {
        self.best_fitness
    }

    /// Feeds the best parameters of the generation just bred.
    ///
    /// Returns [`ConvergenceDecision::Converged`] without advancing the
    /// iteration counter when the stability streak exceeds the patience.
    #[instrument(level = "debug", skip(self, parameters), fields(iteration = self.current_iteration, stable = self.consecutive_stable_iterations))]
    pub(crate) fn observe(&mut self, parameters: &[Gene]) -> ConvergenceDecision {
        if self.current_iteration > self.criteria.min_iterations {
            if let Some(previous) = &self.previous_parameters {
                let max_abs_delta = parameters
                    .iter()
                    .zip(previous.iter())
                    .map(|(current, previous)| (current - previous).abs())
                    .fold(0.0, f64::max);

                if max_abs_delta < self.criteria.absolute_tolerance {
                    self.consecutive_stable_iterations += 1;
                } else {
                    self.consecutive_stable_iterations = 0;
                }
            }
        }

        if self.consecutive_stable_iterations > self.criteria.stop_patience {
            return ConvergenceDecision::Converged;
        }

        self.previous_parameters = Some(parameters.to_vec());
        self.current_iteration += 1;
        ConvergenceDecision::Continue
    }
}
