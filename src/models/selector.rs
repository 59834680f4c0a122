//! Parent selection strategies.
//!
//! A selector picks parent pairs from the current members of a population.
//! Members are always handed over sorted by ascending fitness, so index 0 is
//! the fittest. Selected pairs are returned as indices into that slice.
//!
//! # Selection Methods
//!
//! ## Ranked
//!
//! Picks index `floor((1 - sqrt(u)) * n)` for a uniform `u`, which makes the
//! selection probability fall off linearly from the fittest member to the
//! least fit. Only the ordering matters, so it is insensitive to fitness
//! scaling. This is the default.
//!
//! ## Uniform
//!
//! Every member is equally likely. No selection pressure beyond culling.
//!
//! ## Tournament
//!
//! Draws `size` members with replacement and keeps the fittest. Larger
//! tournaments increase selection pressure.
//!
//! ## Roulette
//!
//! Fitness-proportionate selection adapted to minimization: each member is
//! weighted by `worst - fitness`. When every member has the same fitness the
//! wheel is flat and selection falls back to uniform.
//!
//! ```rust
//! use fx_ga_minimize::models::Selector;
//!
//! let ranked = Selector::ranked();
//! let tournament = Selector::tournament(3)?;
//! let roulette = Selector::roulette();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::models::Genotype;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Performs a single roulette wheel spin to select a candidate index.
fn spin_roulette(
    weights: &[(usize, f64)],
    total_weight: f64,
    rng: &mut impl Rng,
) -> Result<usize, SelectionError> {
    let spin = rng.random_range(0.0..total_weight);
    let mut cumulative = 0.0;

    for (index, weight) in weights {
        cumulative += weight;
        if cumulative >= spin {
            return Ok(*index);
        }
    }

    // Unreachable with a correctly summed total
    Err(SelectionError::RouletteSelectionFailed)
}

fn ranked_index(num_candidates: usize, rng: &mut impl Rng) -> usize {
    let skew = rng.random_range(0.0..1.0_f64).sqrt();
    (((1.0 - skew) * num_candidates as f64) as usize).min(num_candidates - 1)
}

fn tournament_index(
    num_candidates: usize,
    tournament_size: usize,
    candidates: &[Genotype],
    rng: &mut impl Rng,
) -> usize {
    let mut winner = rng.random_range(0..num_candidates);
    for _ in 1..tournament_size {
        let challenger = rng.random_range(0..num_candidates);
        if candidates[challenger].cmp_fitness(&candidates[winner]).is_lt() {
            winner = challenger;
        }
    }
    winner
}

/// Selects parent pairs using fitness-proportionate roulette wheel selection.
#[instrument(level = "debug", skip(candidates, rng), fields(num_pairs = num_pairs, num_candidates = num_candidates))]
fn roulette_selection(
    num_pairs: usize,
    num_candidates: usize,
    candidates: &[Genotype],
    rng: &mut impl Rng,
) -> Result<Vec<(usize, usize)>, SelectionError> {
    let finite: Vec<(usize, f64)> = candidates[..num_candidates]
        .iter()
        .enumerate()
        .filter_map(|(index, genotype)| {
            genotype
                .fitness()
                .filter(|fitness| fitness.is_finite())
                .map(|fitness| (index, fitness))
        })
        .collect();

    let Some(worst) = finite.iter().map(|(_, fitness)| *fitness).reduce(f64::max) else {
        return Err(SelectionError::InvalidFitnessForRoulette);
    };

    // Invert: lower fitness = higher weight
    let weights: Vec<(usize, f64)> = finite
        .iter()
        .map(|(index, fitness)| (*index, worst - fitness))
        .collect();
    let total_weight: f64 = weights.iter().map(|(_, weight)| *weight).sum();

    if !total_weight.is_finite() {
        return Err(SelectionError::InvalidFitnessForRoulette);
    }

    let mut parent_pairs = Vec::with_capacity(num_pairs);
    for _ in 0..num_pairs {
        if total_weight <= 0.0 {
            parent_pairs.push((
                finite[rng.random_range(0..finite.len())].0,
                finite[rng.random_range(0..finite.len())].0,
            ));
            continue;
        }
        let parent1 = spin_roulette(&weights, total_weight, rng)?;
        let parent2 = spin_roulette(&weights, total_weight, rng)?;
        parent_pairs.push((parent1, parent2));
    }

    Ok(parent_pairs)
}

/// Parent selection strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Linearly decreasing probability from fittest to least fit.
    Ranked,
    /// Every member equally likely.
    Uniform,
    /// Best of `size` members drawn with replacement.
    Tournament {
        /// Number of candidates that compete in each tournament. Must be at least 1.
        size: usize,
    },
    /// Probability proportional to `worst - fitness`.
    Roulette,
}

/// Errors that can occur during parent selection.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum SelectionError {
    /// No member has been evaluated yet.
    #[error("No valid parents available for selection")]
    NoValidParents,

    /// A tournament needs at least one competitor.
    #[error("Tournament size must be at least 1, got {0}")]
    InvalidTournamentSize(usize),

    /// No member has a finite fitness, or the weights overflow.
    #[error("No candidates with finite fitness for roulette selection")]
    InvalidFitnessForRoulette,

    /// Internal roulette wheel failure.
    #[error("Internal error: roulette wheel failed to select candidate")]
    RouletteSelectionFailed,
}

impl Default for Selector {
    fn default() -> Self {
        Self::Ranked
    }
}

impl Selector {
    pub fn ranked() -> Self {
        Self::Ranked
    }

    pub fn uniform() -> Self {
        Self::Uniform
    }

    pub fn tournament(size: usize) -> Result<Self, SelectionError> {
        let selector = Self::Tournament { size };
        selector.validate()?;
        Ok(selector)
    }

    pub fn roulette() -> Self {
        Self::Roulette
    }

    /// Checks a selector that may have been built directly or deserialized.
    pub(crate) fn validate(&self) -> Result<(), SelectionError> {
        match self {
            Self::Tournament { size } if *size == 0 => {
                Err(SelectionError::InvalidTournamentSize(*size))
            }
            _ => Ok(()),
        }
    }

    /// Selects `num_pairs` parent pairs from candidates sorted by ascending fitness.
    ///
    /// Only evaluated candidates take part.
    #[instrument(level = "debug", skip(self, candidates, rng), fields(method = ?self, num_pairs = num_pairs, num_candidates = candidates.len()))]
    pub(crate) fn select_parents(
        &self,
        num_pairs: usize,
        candidates: &[Genotype],
        rng: &mut impl Rng,
    ) -> Result<Vec<(usize, usize)>, SelectionError> {
        self.validate()?;

        // Evaluated candidates sort first
        let num_candidates = candidates
            .iter()
            .take_while(|genotype| genotype.fitness().is_some())
            .count();

        if num_candidates == 0 {
            return Err(SelectionError::NoValidParents);
        }

        let mut parent_pairs = Vec::with_capacity(num_pairs);
        for _ in 0..num_pairs {
            let pair = match self {
                Self::Ranked => (
                    ranked_index(num_candidates, rng),
                    ranked_index(num_candidates, rng),
                ),
                Self::Uniform => (
                    rng.random_range(0..num_candidates),
                    rng.random_range(0..num_candidates),
                ),
                Self::Tournament { size } => (
                    tournament_index(num_candidates, *size, candidates, rng),
                    tournament_index(num_candidates, *size, candidates, rng),
                ),
                Self::Roulette => {
                    return roulette_selection(num_pairs, num_candidates, candidates, rng);
                }
            };
            parent_pairs.push(pair);
        }

        Ok(parent_pairs)
    }
}
