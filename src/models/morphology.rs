use crate::models::{Gene, GeneBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum MorphologyError {
    #[error("EmptyMorphology: at least one parameter is required")]
    Empty,
    #[error("DimensionMismatch: expected {expected} gene bounds, got {provided}")]
    DimensionMismatch { expected: usize, provided: usize },
}

/// The bounds of every gene in a genome, in parameter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morphology {
    pub(crate) gene_bounds: Vec<GeneBounds>,
}

impl Morphology {
    #[instrument(level = "debug", fields(gene_bounds_count = gene_bounds.len()))]
    pub fn new(gene_bounds: Vec<GeneBounds>) -> Result<Self, MorphologyError> {
        if gene_bounds.is_empty() {
            return Err(MorphologyError::Empty);
        }

        Ok(Self { gene_bounds })
    }

    /// All `n_pars` parameters share the same box.
    pub fn uniform(n_pars: usize, bounds: GeneBounds) -> Result<Self, MorphologyError> {
        Self::new(vec![bounds; n_pars])
    }

    pub fn len(&self) -> usize {
        self.gene_bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gene_bounds.is_empty()
    }

    pub fn gene_bounds(&self) -> &[GeneBounds] {
        &self.gene_bounds
    }

    #[instrument(level = "debug", skip(rng), fields(gene_bounds_count = self.gene_bounds.len()))]
    pub fn random<R: Rng>(&self, rng: &mut R) -> Vec<Gene> {
        self.gene_bounds
            .iter()
            .map(|gene_bound| gene_bound.random(rng))
            .collect()
    }

    pub fn contains(&self, genome: &[Gene]) -> bool {
        genome.len() == self.gene_bounds.len()
            && genome
                .iter()
                .zip(self.gene_bounds.iter())
                .all(|(gene, bounds)| bounds.contains(*gene))
    }
}
