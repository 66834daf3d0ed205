pub mod launcher;
pub mod objective;
pub mod options;

pub use launcher::{run, EvolutionLauncher, EvolutionResult};
pub use objective::{FnObjective, Objective};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
