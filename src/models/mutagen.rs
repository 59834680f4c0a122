use crate::models::{Genotype, Morphology};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

fn decay_linear(value: f64, progress: f64, multiplier: f64) -> f64 {
    value * (1.0 - progress * multiplier).max(0.0)
}

fn decay_exponential(value: f64, progress: f64, multiplier: f64, exponent: i32) -> f64 {
    value * (1.0 - progress * multiplier).max(0.0).powi(exponent)
}

// ============================================================
// Decay
// ============================================================
/// How a mutation parameter shrinks as the run progresses from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decay {
    Constant,
    Linear { multiplier: f64 },
    Exponential { multiplier: f64, exponent: i32 },
}

impl Decay {
    fn apply(&self, value: f64, progress: f64) -> f64 {
        match self {
            Decay::Constant => value,
            Decay::Linear { multiplier } => decay_linear(value, progress, *multiplier),
            Decay::Exponential {
                multiplier,
                exponent,
            } => decay_exponential(value, progress, *multiplier, *exponent),
        }
    }
}

// ============================================================
// MutationMagnitude
// ============================================================
/// Largest mutation step, as a fraction of each gene's bound range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationMagnitude {
    value: f64,
    decay: Decay,
}

#[derive(Debug, thiserror::Error)]
#[error("mutation_magnitude must be finite and non-negative, got: {0}")]
pub struct MutationMagnitudeOutOfRange(f64);

impl MutationMagnitude {
    pub fn new(value: f64, decay: Decay) -> Result<Self, MutationMagnitudeOutOfRange> {
        let value = Self::validate(value)?;

        Ok(Self { value, decay })
    }

    pub fn constant(value: f64) -> Result<Self, MutationMagnitudeOutOfRange> {
        Self::new(value, Decay::Constant)
    }

    fn validate(value: f64) -> Result<f64, MutationMagnitudeOutOfRange> {
        if !value.is_finite() || value < 0.0 {
            return Err(MutationMagnitudeOutOfRange(value));
        }

        Ok(value)
    }

    fn get(&self, progress: f64) -> f64 {
        self.decay.apply(self.value, progress)
    }
}

// ============================================================
// MutationRate
// ============================================================
/// Per-gene probability of mutating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRate {
    value: f64,
    decay: Decay,
}

#[derive(Debug, thiserror::Error)]
#[error("mutation_rate must be between 0.0 and 1.0, got: {0}")]
pub struct MutationRateOutOfRange(f64);

impl MutationRate {
    pub fn new(value: f64, decay: Decay) -> Result<Self, MutationRateOutOfRange> {
        let value = Self::validate(value)?;

        Ok(Self { value, decay })
    }

    pub fn constant(value: f64) -> Result<Self, MutationRateOutOfRange> {
        Self::new(value, Decay::Constant)
    }

    fn validate(value: f64) -> Result<f64, MutationRateOutOfRange> {
        if !(0.0..=1.0).contains(&value) {
            return Err(MutationRateOutOfRange(value));
        }

        Ok(value)
    }

    fn get(&self, progress: f64) -> f64 {
        self.decay.apply(self.value, progress).clamp(0.0, 1.0)
    }
}

// ============================================================
// Mutagen
// ============================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutagen {
    mutation_rate: MutationRate,
    mutation_magnitude: MutationMagnitude,
}

#[derive(Debug, thiserror::Error)]
pub enum MutagenError {
    #[error("Mutation rate error: {0}")]
    MutationRate(#[from] MutationRateOutOfRange),
    #[error("Mutation magnitude error: {0}")]
    MutationMagnitude(#[from] MutationMagnitudeOutOfRange),
}

impl Default for Mutagen {
    /// Mutates one gene in ten by up to a tenth of its range.
    fn default() -> Self {
        Self {
            mutation_rate: MutationRate {
                value: 0.1,
                decay: Decay::Constant,
            },
            mutation_magnitude: MutationMagnitude {
                value: 0.1,
                decay: Decay::Constant,
            },
        }
    }
}

impl Mutagen {
    pub fn new(mutation_rate: MutationRate, mutation_magnitude: MutationMagnitude) -> Self {
        Self {
            mutation_rate,
            mutation_magnitude,
        }
    }

    pub fn constant(
        mutation_rate_value: f64,
        mutation_magnitude_value: f64,
    ) -> Result<Self, MutagenError> {
        let mutation_rate = MutationRate::constant(mutation_rate_value)?;
        let mutation_magnitude = MutationMagnitude::constant(mutation_magnitude_value)?;

        Ok(Self {
            mutation_rate,
            mutation_magnitude,
        })
    }

    /// Checks a mutagen that may have been deserialized.
    pub(crate) fn validate(&self) -> Result<(), MutagenError> {
        MutationRate::validate(self.mutation_rate.value)?;
        MutationMagnitude::validate(self.mutation_magnitude.value)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, rng, genotype, morphology), fields(genotype_id = %genotype.id, progress = progress))]
    pub(crate) fn mutate<R: Rng>(
        &self,
        rng: &mut R,
        genotype: &mut Genotype,
        morphology: &Morphology,
        progress: f64,
    ) {
        let mutation_rate = self.mutation_rate.get(progress);
        let mutation_magnitude = self.mutation_magnitude.get(progress);

        for (gene, bounds) in genotype
            .genome_mut()
            .iter_mut()
            .zip(morphology.gene_bounds.iter())
        {
            *gene = bounds.mutate(rng, *gene, mutation_rate, mutation_magnitude);
        }
    }
}
