use crate::models::{Morphology, Objective};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use tracing::instrument;
use uuid::Uuid;

pub type Gene = f64;

/// One candidate solution: a genome plus its cached fitness.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Genotype {
    pub(crate) id: Uuid,
    pub(crate) generation_id: u32,
    pub(crate) genome: Vec<Gene>,
    pub(crate) fitness: Option<f64>,
}

impl Genotype {
    #[instrument(level = "debug", skip(genome), fields(genome_length = genome.len(), generation_id = generation_id))]
    pub(crate) fn new(genome: Vec<Gene>, generation_id: u32) -> Self {
        Self {
            id: Uuid::now_v7(),
            generation_id,
            genome,
            fitness: None,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, morphology: &Morphology, generation_id: u32) -> Self {
        Self::new(morphology.random(rng), generation_id)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generation_id(&self) -> u32 {
        self.generation_id
    }

    /// Gene values in parameter order.
    pub fn decode(&self) -> &[Gene] {
        &self.genome
    }

    /// Cached fitness, if evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Mutable genome access. Drops the cached fitness.
    pub(crate) fn genome_mut(&mut self) -> &mut [Gene] {
        self.fitness = None;
        &mut self.genome
    }

    /// Returns the cached fitness, calling the objective only when missing.
    #[instrument(level = "debug", skip(self, objective), fields(genotype_id = %self.id, cached = self.fitness.is_some()))]
    pub(crate) fn evaluate<O>(&mut self, objective: &O) -> Result<f64, anyhow::Error>
    where
        O: Objective + ?Sized,
    {
        if let Some(fitness) = self.fitness {
            return Ok(fitness);
        }

        let fitness = objective.evaluate(&self.genome)?;
        self.fitness = Some(fitness);
        Ok(fitness)
    }

    /// Ascending fitness, unevaluated genotypes and NaN last.
    pub(crate) fn cmp_fitness(&self, other: &Self) -> Ordering {
        let lhs = self.fitness.filter(|fitness| !fitness.is_nan());
        let rhs = other.fitness.filter(|fitness| !fitness.is_nan());

        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => lhs.total_cmp(&rhs),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fitness) => write!(f, "Genotype fitness={fitness:.12},")?,
            None => write!(f, "Genotype fitness=?,")?,
        }
        for gene in &self.genome {
            write!(f, " {gene:.12}")?;
        }
        Ok(())
    }
}
