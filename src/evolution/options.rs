//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of one run: the
//! number of generations, elitism, the parent selection scheme, the fitness
//! scaling, the ranking pressure, the logging level and the population size
//! from which objective evaluation goes parallel.
//!
//! ## Example
//!
//! ```rust
//! use simplega::evolution::options::{EvolutionOptions, LogLevel};
//! use simplega::fitness::FitnessScaling;
//! use simplega::selection::SelectionMethod;
//!
//! let custom_options = EvolutionOptions::new(100, LogLevel::Minimal);
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(200)
//!     .selection(SelectionMethod::StochasticUniversal)
//!     .fitness_scaling(FitnessScaling::Ranking)
//!     .ranking_pressure(1.5)
//!     .build();
//!
//! let default_options = EvolutionOptions::default();
//! assert!(default_options.get_elitism());
//! ```

use crate::fitness::{FitnessScaling, DEFAULT_RANKING_PRESSURE};
use crate::selection::SelectionMethod;

/// How much the evolution loop reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Every individual of every generation, at debug level.
    Verbose,
    /// One line per generation with the best objective.
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    elitism: bool,
    selection: SelectionMethod,
    fitness_scaling: FitnessScaling,
    /// Selective pressure in `[1, 2]`, used with `FitnessScaling::Ranking`
    ranking_pressure: f64,
    log_level: LogLevel,
    /// Minimum population size evaluated in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(num_generations: usize, log_level: LogLevel) -> Self {
        Self {
            num_generations,
            log_level,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_elitism(&self) -> bool {
        self.elitism
    }

    pub fn get_selection(&self) -> SelectionMethod {
        self.selection
    }

    pub fn get_fitness_scaling(&self) -> FitnessScaling {
        self.fitness_scaling
    }

    pub fn get_ranking_pressure(&self) -> f64 {
        self.ranking_pressure
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Returns the minimum number of individuals to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_elitism(&mut self, elitism: bool) {
        self.elitism = elitism;
    }

    pub fn set_selection(&mut self, selection: SelectionMethod) {
        self.selection = selection;
    }

    pub fn set_fitness_scaling(&mut self, fitness_scaling: FitnessScaling) {
        self.fitness_scaling = fitness_scaling;
    }

    pub fn set_ranking_pressure(&mut self, ranking_pressure: f64) {
        self.ranking_pressure = ranking_pressure;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simplega::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .num_generations(50)
    ///     .elitism(false)
    ///     .log_level(LogLevel::Minimal)
    ///     .parallel_threshold(500)
    ///     .build();
    /// assert!(!options.get_elitism());
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 10,
            elitism: true,
            selection: SelectionMethod::Roulette,
            fitness_scaling: FitnessScaling::Linear,
            ranking_pressure: DEFAULT_RANKING_PRESSURE,
            log_level: LogLevel::None,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    elitism: Option<bool>,
    selection: Option<SelectionMethod>,
    fitness_scaling: Option<FitnessScaling>,
    ranking_pressure: Option<f64>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn elitism(mut self, value: bool) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn selection(mut self, value: SelectionMethod) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn fitness_scaling(mut self, value: FitnessScaling) -> Self {
        self.fitness_scaling = Some(value);
        self
    }

    pub fn ranking_pressure(mut self, value: f64) -> Self {
        self.ranking_pressure = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            elitism: self.elitism.unwrap_or(default.elitism),
            selection: self.selection.unwrap_or(default.selection),
            fitness_scaling: self.fitness_scaling.unwrap_or(default.fitness_scaling),
            ranking_pressure: self.ranking_pressure.unwrap_or(default.ranking_pressure),
            log_level: self.log_level.unwrap_or(default.log_level),
            parallel_threshold: self.parallel_threshold.unwrap_or(default.parallel_threshold),
        }
    }
}
