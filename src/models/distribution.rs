use crate::models::{Gene, Morphology};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How the initial population is spread over the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Every gene drawn independently and uniformly.
    #[default]
    Random,
    /// One sample per stratum in every dimension, jittered within the stratum.
    LatinHypercube,
}

impl Distribution {
    pub fn latin_hypercube() -> Self {
        Distribution::LatinHypercube
    }

    pub fn random() -> Self {
        Distribution::Random
    }

    #[instrument(level = "debug", skip(self, morphology, rng), fields(distribution = ?self, n_samples = n_samples))]
    pub(crate) fn distribute<R: Rng>(
        &self,
        n_samples: usize,
        morphology: &Morphology,
        rng: &mut R,
    ) -> Vec<Vec<Gene>> {
        match self {
            Distribution::LatinHypercube => latin_hypercube(n_samples, morphology, rng),
            Distribution::Random => random_distribution(n_samples, morphology, rng),
        }
    }
}

fn random_distribution<R: Rng>(
    n_samples: usize,
    morphology: &Morphology,
    rng: &mut R,
) -> Vec<Vec<Gene>> {
    (0..n_samples).map(|_| morphology.random(rng)).collect()
}

fn latin_hypercube<R: Rng>(
    n_samples: usize,
    morphology: &Morphology,
    rng: &mut R,
) -> Vec<Vec<Gene>> {
    let mut genomes: Vec<Vec<Gene>> = (0..n_samples)
        .map(|_| Vec::with_capacity(morphology.len()))
        .collect();

    for gene_bound in morphology.gene_bounds.iter() {
        // 1. One jittered sample inside each of n_samples equal strata
        let mut samples: Vec<f64> = (0..n_samples)
            .map(|i| (i as f64 + rng.random_range(0.0..1.0)) / n_samples as f64)
            .collect();

        // 2. Shuffle to decorrelate dimensions
        samples.shuffle(rng);

        // 3. Map onto the bounds and transpose into the genomes
        for (genome, sample) in genomes.iter_mut().zip(samples) {
            genome.push(gene_bound.from_sample(sample));
        }
    }

    genomes
}
