use crate::models::{Conclusion, Gene};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Best member of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: u32,
    pub best_fitness: Option<f64>,
}

/// The result of one minimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub run_id: Uuid,
    /// Best parameters observed over the whole run.
    pub parameters: Vec<Gene>,
    /// Objective value of `parameters`, if it was a number.
    pub fitness: Option<f64>,
    /// Best parameters of the final generation.
    pub last_generation_parameters: Vec<Gene>,
    /// Number of generations bred after the initial population.
    pub generations: u32,
    pub conclusion: Conclusion,
    pub started_at: DateTime<Utc>,
    pub concluded_at: DateTime<Utc>,
    pub history: Vec<GenerationSummary>,
}

impl Outcome {
    pub fn is_converged(&self) -> bool {
        self.conclusion == Conclusion::Converged
    }
}

/// Renders parameters the way progress lines print them.
pub(crate) fn format_parameters(parameters: &[Gene]) -> String {
    parameters
        .iter()
        .map(|parameter| format!("{parameter:>10.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}
