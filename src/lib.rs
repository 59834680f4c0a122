//! Bounded real-valued minimization with a genetic algorithm.
//!
//! A population of candidate parameter vectors is bred generation after
//! generation: parents are selected by fitness, recombined, mutated and culled
//! back to a fixed size, keeping a handful of elites. The run stops once the
//! best parameters stop moving, when the iteration budget runs out, or when a
//! cancellation signal is raised.
//!
//! ```rust
//! use fx_ga_minimize::{MinimizerBuilder, models::infallible};
//!
//! let outcome = MinimizerBuilder::new()
//!     .dimensions(2)
//!     .objective(infallible(|p: &[f64]| (p[0] - 3.0).powi(2) + (p[1] + 2.0).powi(2)))
//!     .with_seed(1)
//!     .build()?
//!     .minimize()?;
//!
//! assert!((outcome.parameters[0] - 3.0).abs() < 1e-3);
//! assert!((outcome.parameters[1] + 2.0).abs() < 1e-3);
//! # Ok::<(), fx_ga_minimize::Error>(())
//! ```

pub mod bootstrap;
pub mod builder;
pub mod models;
pub mod services;

pub use bootstrap::{Settings, bootstrap};
pub use services::minimization::{
    ConfigurationError, Error, GenerationSummary, Minimizer, MinimizerBuilder, Outcome, minimize,
};
