mod breeder;
mod convergence;
mod crossover;
mod distribution;
mod gene_bounds;
mod genotype;
mod morphology;
mod mutagen;
mod objective;
mod population;
mod schedule;
mod selector;
mod species;
mod terminated;

pub use convergence::{Conclusion, StoppingCriteria, ToleranceOutOfRange};
pub use crossover::{Crossover, CrossoverError};
pub use distribution::Distribution;
pub use gene_bounds::{GeneBoundError, GeneBounds};
pub use genotype::{Gene, Genotype};
pub use morphology::{Morphology, MorphologyError};
pub use mutagen::{
    Decay, Mutagen, MutagenError, MutationMagnitude, MutationMagnitudeOutOfRange, MutationRate,
    MutationRateOutOfRange,
};
pub use objective::{Infallible, Objective, WithArgs, fallible, infallible, with_args};
pub use population::{EmptyPopulationError, Population, PopulationError};
pub use schedule::{Schedule, ScheduleError};
pub use selector::{SelectionError, Selector};
pub use species::{Species, SpeciesError};
pub use terminated::{Never, Terminated};

pub(crate) use breeder::Breeder;
pub(crate) use convergence::{Convergence, ConvergenceDecision};
