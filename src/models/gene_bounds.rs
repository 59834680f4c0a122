use super::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mutation steps are scaled down by up to this many powers of ten.
const MUTATION_SCALE_DECADES: f64 = 12.0;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GeneBoundError {
    #[error(
        "InvalidBounds: lower bound must not be larger than upper. lower = {lower}, upper = {upper}"
    )]
    InvalidBound { lower: f64, upper: f64 },
    #[error("NonFinite: bounds must be finite. lower = {lower}, upper = {upper}")]
    NonFinite { lower: f64, upper: f64 },
    #[error("RangeOverflow: upper - lower is not finite. lower = {lower}, upper = {upper}")]
    RangeOverflow { lower: f64, upper: f64 },
}

impl GeneBoundError {
    pub(crate) fn invalid_bound(lower: f64, upper: f64) -> Self {
        Self::InvalidBound { lower, upper }
    }

    pub(crate) fn non_finite(lower: f64, upper: f64) -> Self {
        Self::NonFinite { lower, upper }
    }

    pub(crate) fn range_overflow(lower: f64, upper: f64) -> Self {
        Self::RangeOverflow { lower, upper }
    }
}

/// Unchecked wire form of [`GeneBounds`].
#[derive(Deserialize)]
struct RawGeneBounds {
    lower: f64,
    upper: f64,
}

impl TryFrom<RawGeneBounds> for GeneBounds {
    type Error = GeneBoundError;

    fn try_from(raw: RawGeneBounds) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

/// Closed interval a single parameter is confined to.
///
/// Every operation producing a gene value (random initialization, mutation,
/// crossover) ends in [`GeneBounds::clamp`], so a gene never leaves its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeneBounds")]
pub struct GeneBounds {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}

impl GeneBounds {
    #[instrument(level = "debug", fields(lower = lower, upper = upper))]
    pub fn new(lower: f64, upper: f64) -> Result<Self, GeneBoundError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(GeneBoundError::non_finite(lower, upper));
        }

        if lower > upper {
            return Err(GeneBoundError::invalid_bound(lower, upper));
        };

        if !(upper - lower).is_finite() {
            return Err(GeneBoundError::range_overflow(lower, upper));
        }

        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Width of the interval.
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: Gene) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    pub fn clamp(&self, value: Gene) -> Gene {
        value.clamp(self.lower, self.upper)
    }

    /// Draws a value uniformly from the interval.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Gene {
        if self.lower == self.upper {
            return self.lower;
        }
        rng.random_range(self.lower..=self.upper)
    }

    /// Maps a sample in `[0, 1]` onto the interval.
    pub fn from_sample(&self, sample: f64) -> Gene {
        self.clamp(self.lower + sample.clamp(0.0, 1.0) * self.range())
    }

    /// Perturbs `value` with the given probability.
    ///
    /// The step is drawn from `[-magnitude, magnitude]` times the interval
    /// width, shrunk by a log-uniform factor between 1 and `1e-12`, so steps
    /// of every scale down to the convergence tolerance keep occurring. The
    /// result is clamped back into the interval.
    pub fn mutate<R: Rng>(
        &self,
        rng: &mut R,
        value: Gene,
        probability: f64,
        magnitude: f64,
    ) -> Gene {
        if rng.random_range(0.0..1.0) >= probability {
            return value;
        }

        let scale = 10f64.powf(-rng.random_range(0.0..MUTATION_SCALE_DECADES));
        let step = rng.random_range(-1.0..=1.0) * magnitude * scale * self.range();
        self.clamp(value + step)
    }
}
