pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod population;
pub mod rng;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, Encoding};
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult};
pub use rng::{Pick, RandomNumberGenerator, RandomSource};
