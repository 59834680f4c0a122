use crate::models::{
    EmptyPopulationError, GeneBoundError, MorphologyError, PopulationError, SelectionError,
    SpeciesError, ToleranceOutOfRange,
};

/// Invalid minimizer configuration. Always raised before the objective is called.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("ZeroDimensions: n_pars must be at least 1")]
    ZeroDimensions,
    #[error("GeneBounds: {0}")]
    GeneBounds(#[from] GeneBoundError),
    #[error("Morphology: {0}")]
    Morphology(#[from] MorphologyError),
    #[error("Species: {0}")]
    Species(#[from] SpeciesError),
    #[error("StoppingCriteria: {0}")]
    StoppingCriteria(#[from] ToleranceOutOfRange),
}

/// Errors that can occur during minimization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("EvaluationError: {0}")]
    EvaluationError(#[from] anyhow::Error),
    #[error("{0}")]
    EmptyPopulation(#[from] EmptyPopulationError),
    #[error("Selection error: {0}")]
    SelectionError(#[from] SelectionError),
}

impl From<PopulationError> for Error {
    fn from(err: PopulationError) -> Self {
        match err {
            PopulationError::Empty(err) => Error::EmptyPopulation(err),
            PopulationError::Evaluation(err) => Error::EvaluationError(err),
            PopulationError::Selection(err) => Error::SelectionError(err),
            PopulationError::Species(err) => Error::ConfigurationError(err.into()),
        }
    }
}
