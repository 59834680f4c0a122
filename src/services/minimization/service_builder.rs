use super::{ConfigurationError, Error, Minimizer};
use crate::builder::{Set, Unset};
use crate::models::{
    Crossover, Distribution, GeneBounds, Morphology, MorphologyError, Mutagen, Never, Objective,
    Schedule, Selector, Species, StoppingCriteria, Terminated,
};
use tracing::instrument;

/// Configures a [`Minimizer`].
///
/// The number of parameters and the objective are required and tracked in the
/// type, so `build` is only available once both are set. Everything else falls
/// back to a default.
///
/// ```rust
/// use fx_ga_minimize::{MinimizerBuilder, models::infallible};
///
/// let minimizer = MinimizerBuilder::new()
///     .dimensions(2)
///     .objective(infallible(|p: &[f64]| (p[0] - 3.0).powi(2) + (p[1] + 2.0).powi(2)))
///     .with_bounds(-10.0, 10.0)
///     .with_seed(7)
///     .build()?;
///
/// let outcome = minimizer.minimize()?;
/// assert_eq!(outcome.parameters.len(), 2);
/// # Ok::<(), fx_ga_minimize::Error>(())
/// ```
pub struct MinimizerBuilder<D, O> {
    pub(super) dimensions: D,
    pub(super) objective: O,
    pub(super) bounds: (f64, f64),
    pub(super) gene_bounds: Option<Vec<GeneBounds>>,
    pub(super) schedule: Schedule,
    pub(super) selector: Selector,
    pub(super) crossover: Crossover,
    pub(super) mutagen: Mutagen,
    pub(super) distribution: Distribution,
    pub(super) stopping_criteria: StoppingCriteria,
    pub(super) verbose: bool,
    pub(super) seed: Option<u64>,
    pub(super) terminated: Box<dyn Terminated>,
}

impl Default for MinimizerBuilder<Unset<usize>, Unset<()>> {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimizerBuilder<Unset<usize>, Unset<()>> {
    pub fn new() -> Self {
        Self {
            dimensions: Unset::new(),
            objective: Unset::new(),
            bounds: (-100.0, 100.0),
            gene_bounds: None,
            schedule: Schedule::default(),
            selector: Selector::default(),
            crossover: Crossover::default(),
            mutagen: Mutagen::default(),
            distribution: Distribution::default(),
            stopping_criteria: StoppingCriteria::default(),
            verbose: false,
            seed: None,
            terminated: Box::new(Never),
        }
    }
}

impl<D, O> MinimizerBuilder<D, O> {
    fn replace_required<D2, O2>(
        self,
        replace: impl FnOnce(D, O) -> (D2, O2),
    ) -> MinimizerBuilder<D2, O2> {
        let MinimizerBuilder {
            dimensions,
            objective,
            bounds,
            gene_bounds,
            schedule,
            selector,
            crossover,
            mutagen,
            distribution,
            stopping_criteria,
            verbose,
            seed,
            terminated,
        } = self;
        let (dimensions, objective) = replace(dimensions, objective);

        MinimizerBuilder {
            dimensions,
            objective,
            bounds,
            gene_bounds,
            schedule,
            selector,
            crossover,
            mutagen,
            distribution,
            stopping_criteria,
            verbose,
            seed,
            terminated,
        }
    }

    /// Same `[low, high]` box for every parameter. Defaults to `[-100, 100]`.
    pub fn with_bounds(mut self, low: f64, high: f64) -> Self {
        self.bounds = (low, high);
        self.gene_bounds = None;
        self
    }

    /// One box per parameter. Must hold exactly `dimensions` entries.
    pub fn with_gene_bounds(mut self, gene_bounds: Vec<GeneBounds>) -> Self {
        self.gene_bounds = Some(gene_bounds);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutagen(mut self, mutagen: Mutagen) -> Self {
        self.mutagen = mutagen;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_stopping_criteria(mut self, stopping_criteria: StoppingCriteria) -> Self {
        self.stopping_criteria = stopping_criteria;
        self
    }

    pub fn with_stop_patience(mut self, stop_patience: u32) -> Self {
        self.stopping_criteria.stop_patience = stop_patience;
        self
    }

    pub fn with_absolute_tolerance(mut self, absolute_tolerance: f64) -> Self {
        self.stopping_criteria.absolute_tolerance = absolute_tolerance;
        self
    }

    pub fn with_min_iterations(mut self, min_iterations: u32) -> Self {
        self.stopping_criteria.min_iterations = min_iterations;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.stopping_criteria.max_iterations = max_iterations;
        self
    }

    /// Logs the best parameters of every generation at `info` level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checked before every generation; a raised signal ends the run as `Interrupted`.
    pub fn with_terminated<T>(mut self, terminated: T) -> Self
    where
        T: Terminated + 'static,
    {
        self.terminated = Box::new(terminated);
        self
    }
}

impl<O> MinimizerBuilder<Unset<usize>, O> {
    /// Number of parameters the objective takes.
    pub fn dimensions(self, n_pars: usize) -> MinimizerBuilder<Set<usize>, O> {
        self.replace_required(|_, objective| (Set::new(n_pars), objective))
    }
}

impl<D> MinimizerBuilder<D, Unset<()>> {
    pub fn objective<F>(self, objective: F) -> MinimizerBuilder<D, Set<F>>
    where
        F: Objective,
    {
        self.replace_required(|dimensions, _| (dimensions, Set::new(objective)))
    }
}

impl<F: Objective> MinimizerBuilder<Set<usize>, Set<F>> {
    /// Validates the configuration. The objective is not called.
    #[instrument(level = "debug", skip(self), fields(n_pars = *self.dimensions.as_ref_inner()))]
    pub fn build(self) -> Result<Minimizer<F>, Error> {
        let n_pars = self.dimensions.into_inner();
        if n_pars == 0 {
            return Err(ConfigurationError::ZeroDimensions.into());
        }

        let morphology = match self.gene_bounds {
            Some(gene_bounds) if gene_bounds.len() != n_pars => {
                return Err(ConfigurationError::from(MorphologyError::DimensionMismatch {
                    expected: n_pars,
                    provided: gene_bounds.len(),
                })
                .into());
            }
            Some(gene_bounds) => Morphology::new(gene_bounds).map_err(ConfigurationError::from)?,
            None => {
                let (low, high) = self.bounds;
                let bounds = GeneBounds::new(low, high).map_err(ConfigurationError::from)?;
                Morphology::uniform(n_pars, bounds).map_err(ConfigurationError::from)?
            }
        };

        let species = Species::new(morphology)
            .with_schedule(self.schedule)
            .with_selector(self.selector)
            .with_crossover(self.crossover)
            .with_mutagen(self.mutagen)
            .with_distribution(self.distribution);
        species.validate().map_err(ConfigurationError::from)?;

        self.stopping_criteria
            .validate()
            .map_err(ConfigurationError::from)?;

        Ok(Minimizer {
            objective: self.objective.into_inner(),
            species,
            stopping_criteria: self.stopping_criteria,
            verbose: self.verbose,
            seed: self.seed,
            terminated: self.terminated,
        })
    }
}
