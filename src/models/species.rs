use crate::models::{
    Crossover, CrossoverError, Distribution, Morphology, MorphologyError, Mutagen, MutagenError,
    Schedule, ScheduleError, SelectionError, Selector,
};
use serde::{Deserialize, Serialize};

/// Everything a population needs to create and breed genotypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub(crate) morphology: Morphology,
    pub(crate) schedule: Schedule,
    pub(crate) selector: Selector,
    pub(crate) crossover: Crossover,
    pub(crate) mutagen: Mutagen,
    pub(crate) distribution: Distribution,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeciesError {
    #[error("Morphology error: {0}")]
    Morphology(#[from] MorphologyError),
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("Selector error: {0}")]
    Selector(#[from] SelectionError),
    #[error("Crossover error: {0}")]
    Crossover(#[from] CrossoverError),
    #[error("Mutagen error: {0}")]
    Mutagen(#[from] MutagenError),
}

impl Species {
    /// A species with the default schedule and operators.
    pub fn new(morphology: Morphology) -> Self {
        Self {
            morphology,
            schedule: Schedule::default(),
            selector: Selector::default(),
            crossover: Crossover::default(),
            mutagen: Mutagen::default(),
            distribution: Distribution::default(),
        }
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

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Checks a species that may have been assembled from public operator
    /// variants or deserialized.
    pub(crate) fn validate(&self) -> Result<(), SpeciesError> {
        if self.morphology.is_empty() {
            return Err(MorphologyError::Empty.into());
        }
        self.schedule.validate()?;
        self.selector.validate()?;
        self.crossover.validate()?;
        self.mutagen.validate()?;
        Ok(())
    }
}
