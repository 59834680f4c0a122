//! File-free configuration of a minimizer.
//!
//! [`Settings`] gathers every tunable of a run in one serde document. Missing
//! fields take their defaults, so a settings file only needs to name what it
//! changes:
//!
//! ```rust
//! use fx_ga_minimize::bootstrap::{Settings, bootstrap};
//! use fx_ga_minimize::models::infallible;
//!
//! let settings = Settings::from_json(r#"{ "bounds": [-5.0, 5.0], "seed": 42 }"#)?;
//! let outcome = bootstrap(settings)
//!     .dimensions(2)
//!     .objective(infallible(|p: &[f64]| p[0].powi(2) + p[1].powi(2)))
//!     .build()?
//!     .minimize()?;
//!
//! assert!(outcome.parameters.iter().all(|p| (-5.0..=5.0).contains(p)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::builder::Unset;
use crate::models::{Crossover, Distribution, Mutagen, Schedule, Selector, StoppingCriteria};
use crate::services::minimization::MinimizerBuilder;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `[low, high]` applied to every parameter.
    pub bounds: (f64, f64),
    pub schedule: Schedule,
    pub selector: Selector,
    pub crossover: Crossover,
    pub mutagen: Mutagen,
    pub distribution: Distribution,
    pub stopping_criteria: StoppingCriteria,
    pub verbose: bool,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: (-100.0, 100.0),
            schedule: Schedule::default(),
            selector: Selector::default(),
            crossover: Crossover::default(),
            mutagen: Mutagen::default(),
            distribution: Distribution::default(),
            stopping_criteria: StoppingCriteria::default(),
            verbose: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parses a JSON settings document. Values are validated when the
    /// minimizer is built, not here.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A builder preloaded with `settings`. Dimensions and the objective are still required.
#[instrument(level = "debug", skip(settings), fields(bounds = ?settings.bounds, seed = ?settings.seed))]
pub fn bootstrap(settings: Settings) -> MinimizerBuilder<Unset<usize>, Unset<()>> {
    let (low, high) = settings.bounds;
    let builder = MinimizerBuilder::new()
        .with_bounds(low, high)
        .with_schedule(settings.schedule)
        .with_selector(settings.selector)
        .with_crossover(settings.crossover)
        .with_mutagen(settings.mutagen)
        .with_distribution(settings.distribution)
        .with_stopping_criteria(settings.stopping_criteria)
        .with_verbose(settings.verbose);

    match settings.seed {
        Some(seed) => builder.with_seed(seed),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::infallible;
    use crate::services::minimization::{ConfigurationError, Error};

    #[test]
    fn it_defaults_every_missing_field() {
        let settings = Settings::from_json("{}").unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn it_merges_partial_nested_sections() {
        let settings = Settings::from_json(
            r#"{
                "bounds": [-1.0, 1.0],
                "schedule": { "child_count": 80, "child_cull_count": 30 },
                "stopping_criteria": { "max_iterations": 250 },
                "selector": { "Tournament": { "size": 3 } },
                "distribution": "LatinHypercube",
                "seed": 9
            }"#,
        )
        .unwrap();

        assert_eq!(settings.bounds, (-1.0, 1.0));
        assert_eq!(settings.schedule, Schedule::new(2, 80, 30, 10).unwrap());
        assert_eq!(settings.stopping_criteria.max_iterations, 250);
        assert_eq!(settings.stopping_criteria.stop_patience, 10);
        assert_eq!(settings.selector, Selector::tournament(3).unwrap());
        assert_eq!(settings.distribution, Distribution::LatinHypercube);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn it_round_trips_through_json() {
        let settings = Settings {
            verbose: true,
            seed: Some(1),
            ..Settings::default()
        };

        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();

        assert_eq!(parsed, settings);
    }

    #[test]
    fn it_rejects_malformed_documents() {
        assert!(matches!(
            Settings::from_json(r#"{ "bounds": "wide" }"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn it_validates_loaded_values_at_build_time() {
        let settings = Settings::from_json(r#"{ "bounds": [1.0, -1.0] }"#).unwrap();

        let result = bootstrap(settings)
            .dimensions(2)
            .objective(infallible(|p| p.iter().sum()))
            .build();

        assert!(matches!(
            result,
            Err(Error::ConfigurationError(ConfigurationError::GeneBounds(_)))
        ));
    }

    #[test]
    fn it_carries_settings_into_the_minimizer() {
        let settings = Settings::from_json(
            r#"{ "stopping_criteria": { "max_iterations": 7 }, "seed": 2 }"#,
        )
        .unwrap();

        let minimizer = bootstrap(settings)
            .dimensions(1)
            .objective(infallible(|p| p[0].abs()))
            .build()
            .unwrap();
        let outcome = minimizer.minimize().unwrap();

        assert_eq!(minimizer.stopping_criteria().max_iterations, 7);
        assert_eq!(outcome.generations, 7);
    }
}
