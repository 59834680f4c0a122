use crate::models::{Gene, Genotype, Morphology};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Performs uniform crossover by selecting genes from each parent with the given probability.
#[instrument(level = "debug", skip(rng, lhs, rhs), fields(genome_length = lhs.decode().len(), probability = probability))]
fn crossover_uniform<R: Rng>(
    rng: &mut R,
    lhs: &Genotype,
    rhs: &Genotype,
    probability: f64,
) -> Vec<Gene> {
    lhs.decode()
        .iter()
        .zip(rhs.decode().iter())
        .map(|(&lhs, &rhs)| {
            if rng.random_bool(probability) {
                lhs
            } else {
                rhs
            }
        })
        .collect()
}

/// Performs single-point crossover at the specified cut point.
#[instrument(level = "debug", skip(lhs, rhs), fields(genome_length = lhs.decode().len(), cut_point = point))]
fn crossover_single_point(lhs: &Genotype, rhs: &Genotype, point: usize) -> Vec<Gene> {
    let lhs_genome = lhs.decode();
    let rhs_genome = rhs.decode();
    let mut genome = Vec::with_capacity(lhs_genome.len());

    genome.extend_from_slice(&lhs_genome[..point]); // First part from lhs
    genome.extend_from_slice(&rhs_genome[point..]); // Second part from rhs
    genome
}

/// Draws each gene uniformly from the parents' interval, widened on both sides
/// by `alpha` times its width.
#[instrument(level = "debug", skip(rng, lhs, rhs), fields(genome_length = lhs.decode().len(), alpha = alpha))]
fn crossover_blend<R: Rng>(rng: &mut R, lhs: &Genotype, rhs: &Genotype, alpha: f64) -> Vec<Gene> {
    lhs.decode()
        .iter()
        .zip(rhs.decode().iter())
        .map(|(&lhs, &rhs)| {
            let (low, high) = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
            let extension = alpha * (high - low);
            rng.random_range(low - extension..=high + extension)
        })
        .collect()
}

/// Crossover strategy for combining the genes of two parents.
///
/// # Strategies
///
/// ## Uniform
/// Each parameter is independently taken from either parent. No new values
/// are created, so precision comes from mutation alone.
///
/// ## Single-Point
/// Takes parameters `[0..cut)` from the first parent and `[cut..n)` from the
/// second. Preserves runs of adjacent parameters. Genomes with a single
/// parameter are copied from the first parent.
///
/// ## Blend (default)
/// Each child parameter is drawn uniformly from the interval spanned by the
/// parent values, extended by `alpha` times its width on both sides (BLX-α).
/// The spread of the children follows the spread of the population, so the
/// search narrows as the population gathers around a minimum. `alpha = 0.0`
/// keeps children between their parents.
///
/// # Examples
///
/// ```rust
/// use fx_ga_minimize::models::Crossover;
///
/// let uniform = Crossover::uniform(0.5)?;
/// let single_point = Crossover::single_point();
/// let blend = Crossover::blend(0.5)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Crossover {
    /// Uniform crossover selects each gene from either parent with the given probability.
    ///
    /// - `probability = 0.0`: always the second parent
    /// - `probability = 0.5`: equal chance
    /// - `probability = 1.0`: always the first parent
    Uniform {
        /// Probability of selecting each gene from the first parent (0.0 to 1.0)
        probability: f64,
    },
    /// Single-point crossover cuts genomes at a random point and joins the halves.
    SinglePoint,
    /// Blend crossover, BLX-α.
    Blend {
        /// Fraction of the parent interval added on each side. Must be finite and non-negative.
        alpha: f64,
    },
}

/// Error returned when a crossover parameter is out of range.
///
/// ```rust
/// use fx_ga_minimize::models::Crossover;
///
/// assert!(Crossover::uniform(-0.1).is_err());
/// assert!(Crossover::uniform(1.5).is_err());
/// assert!(Crossover::blend(-0.5).is_err());
/// assert!(Crossover::blend(0.5).is_ok());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CrossoverError {
    #[error("uniform crossover probability must be between 0.0 and 1.0, got {0}")]
    ProbabilityOutOfRange(f64),
    #[error("blend crossover alpha must be finite and non-negative, got {0}")]
    AlphaOutOfRange(f64),
}

impl Default for Crossover {
    fn default() -> Self {
        Self::Blend { alpha: 0.5 }
    }
}

impl Crossover {
    /// Creates a uniform crossover strategy with specified selection probability.
    pub fn uniform(probability: f64) -> Result<Self, CrossoverError> {
        Self::validate_probability(probability)?;

        Ok(Self::Uniform { probability })
    }

    pub fn single_point() -> Self {
        Self::SinglePoint
    }

    pub fn blend(alpha: f64) -> Result<Self, CrossoverError> {
        Self::validate_alpha(alpha)?;

        Ok(Self::Blend { alpha })
    }

    /// Checks a crossover that may have been built directly or deserialized.
    pub(crate) fn validate(&self) -> Result<(), CrossoverError> {
        match self {
            Self::Uniform { probability } => Self::validate_probability(*probability),
            Self::Blend { alpha } => Self::validate_alpha(*alpha),
            Self::SinglePoint => Ok(()),
        }
    }

    fn validate_probability(probability: f64) -> Result<(), CrossoverError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(CrossoverError::ProbabilityOutOfRange(probability));
        }

        Ok(())
    }

    fn validate_alpha(alpha: f64) -> Result<(), CrossoverError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(CrossoverError::AlphaOutOfRange(alpha));
        }

        Ok(())
    }

    /// Applies the crossover to two parents, producing a genome clamped to the morphology.
    #[instrument(level = "debug", skip(self, rng, lhs, rhs, morphology), fields(crossover_type = ?self, genome_length = lhs.decode().len()))]
    pub(crate) fn apply<R: Rng>(
        &self,
        rng: &mut R,
        lhs: &Genotype,
        rhs: &Genotype,
        morphology: &Morphology,
    ) -> Vec<Gene> {
        let genome = match self {
            Self::Uniform { probability } => crossover_uniform(rng, lhs, rhs, *probability),
            Self::SinglePoint if lhs.decode().len() < 2 => lhs.decode().to_vec(),
            Self::SinglePoint => {
                let point = rng.random_range(1..lhs.decode().len()); // Cut point
                crossover_single_point(lhs, rhs, point)
            }
            Self::Blend { alpha } => crossover_blend(rng, lhs, rhs, *alpha),
        };

        genome
            .into_iter()
            .zip(morphology.gene_bounds.iter())
            .map(|(gene, bounds)| bounds.clamp(gene))
            .collect()
    }
}
