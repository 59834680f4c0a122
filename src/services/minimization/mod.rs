mod errors;
mod service;
mod service_builder;

pub(crate) mod models;

pub use errors::{ConfigurationError, Error};
pub use models::{GenerationSummary, Outcome};
pub use service::{Minimizer, minimize};
pub use service_builder::MinimizerBuilder;
