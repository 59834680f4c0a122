use crate::models::{Breeder, Genotype, Objective, SelectionError, Species, SpeciesError};
use rand::Rng;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
#[error("EmptyPopulation: the population holds no genotypes")]
pub struct EmptyPopulationError;

#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error("{0}")]
    Empty(#[from] EmptyPopulationError),
    #[error("EvaluationError: {0}")]
    Evaluation(#[from] anyhow::Error),
    #[error("SelectionError: {0}")]
    Selection(#[from] SelectionError),
    #[error("SpeciesError: {0}")]
    Species(#[from] SpeciesError),
}

/// The working set of genotypes, advanced one generation at a time.
///
/// Members are kept sorted by ascending fitness, so the first member is
/// always the current best. The population does not remember earlier
/// generations; tracking the best genotype ever seen is left to the caller.
#[derive(Debug)]
pub struct Population {
    species: Species,
    members: Vec<Genotype>,
    generation: u32,
}

impl Population {
    /// An empty population. Call [`Population::initialize`] before advancing it.
    pub fn new(species: Species) -> Self {
        Self {
            species,
            members: Vec::new(),
            generation: 0,
        }
    }

    /// Replaces the members with `initial_size` fresh, evaluated genotypes.
    ///
    /// The species is validated first; the objective is not called when it is invalid.
    #[instrument(level = "debug", skip(self, objective, rng), fields(initial_size = self.species.schedule.initial_size))]
    pub fn initialize<O, R>(&mut self, objective: &O, rng: &mut R) -> Result<(), PopulationError>
    where
        O: Objective + ?Sized,
        R: Rng,
    {
        self.species.validate()?;

        let genomes = self.species.distribution.distribute(
            self.species.schedule.initial_size,
            &self.species.morphology,
            rng,
        );

        let mut members = Vec::with_capacity(genomes.len());
        for genome in genomes {
            let mut genotype = Genotype::new(genome, 0);
            genotype.evaluate(objective)?;
            members.push(genotype);
        }
        members.sort_by(Genotype::cmp_fitness);

        self.members = members;
        self.generation = 0;
        Ok(())
    }

    /// Breeds `child_count` offspring and keeps the `child_cull_count` fittest
    /// of the elites and the offspring.
    ///
    /// `progress` runs from 0.0 to 1.0 over a run and drives mutation decay.
    #[instrument(level = "debug", skip(self, objective, rng), fields(generation = self.generation, members = self.members.len(), progress = progress))]
    pub fn advance_generation<O, R>(
        &mut self,
        objective: &O,
        progress: f64,
        rng: &mut R,
    ) -> Result<(), PopulationError>
    where
        O: Objective + ?Sized,
        R: Rng,
    {
        if self.members.is_empty() {
            return Err(EmptyPopulationError.into());
        }

        let schedule = &self.species.schedule;
        let next_generation_id = self.generation + 1;

        let parent_pairs =
            self.species
                .selector
                .select_parents(schedule.child_count, &self.members, rng)?;

        let mut children = Breeder::new(
            &self.species.crossover,
            &self.species.mutagen,
            &self.species.morphology,
        )
        .breed_batch(
            &parent_pairs,
            &self.members,
            next_generation_id,
            progress,
            rng,
        );

        for child in children.iter_mut() {
            child.evaluate(objective)?;
        }

        // Elites go first so they win ties against their offspring
        let elite_count = schedule.elite_count.min(self.members.len());
        let mut survivors: Vec<Genotype> = self.members.drain(..elite_count).collect();
        survivors.extend(children);
        survivors.sort_by(Genotype::cmp_fitness);
        survivors.truncate(schedule.child_cull_count);

        if survivors.is_empty() {
            return Err(EmptyPopulationError.into());
        }

        tracing::debug!(
            generation = next_generation_id,
            survivors = survivors.len(),
            best_fitness = ?survivors[0].fitness(),
            "Generation advanced"
        );

        self.members = survivors;
        self.generation = next_generation_id;
        Ok(())
    }

    /// The fittest member of the current generation.
    pub fn best(&self) -> Result<&Genotype, EmptyPopulationError> {
        self.members.first().ok_or(EmptyPopulationError)
    }

    /// Members sorted by ascending fitness.
    pub fn members(&self) -> &[Genotype] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn species(&self) -> &Species {
        &self.species
    }
}
