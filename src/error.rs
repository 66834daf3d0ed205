//! # Error Types
//!
//! This module defines the error type shared by every operator and by the
//! evolution loop. Almost every variant describes caller misuse (a contract
//! violation): mismatched chromosome lengths, invalid cut points, an odd
//! population fed to pairing. Those are reported immediately and never
//! silently corrected. A degenerate objective vector (all values equal) is
//! not an error; the fitness module handles it locally.
//!
//! ## Examples
//!
//! ```rust
//! use simplega::error::{GeneticError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size % 2 != 0 {
//!         return Err(GeneticError::OddPopulation(size));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(10).is_ok());
//! assert!(check_population(7).unwrap_err().is_contract_violation());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use simplega::error::{GeneticError, OptionExt};
//!
//! fn best_objective(objectives: &[f64]) -> simplega::error::Result<f64> {
//!     objectives.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Pairing needs an even number of individuals.
    #[error("Odd population error: {0} individuals cannot be split into mating pairs")]
    OddPopulation(usize),

    /// Chromosomes of one run (or the two parents of a crossover) differ in length.
    #[error("Chromosome length error in {context}: expected {expected} genes, found {found}")]
    ChromosomeLength {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A chromosome does not carry the encoding the operator expects.
    #[error("Encoding mismatch: {0}")]
    EncodingMismatch(String),

    /// Explicit cut points outside `1 <= cut1 < cut2 <= len`.
    #[error("Invalid cut points in {operator}: cut1={cut1}, cut2={cut2}, len={len}")]
    InvalidCutPoints {
        operator: &'static str,
        cut1: usize,
        cut2: usize,
        len: usize,
    },

    /// Explicit insertion index beyond the remaining sequence.
    #[error("Invalid insertion index in displacement mutation: ins={ins}, remaining len={len}")]
    InvalidInsertion { ins: usize, len: usize },

    /// Explicit samples or pointer offsets that do not fit the selection request.
    #[error("Invalid selection sample: {0}")]
    InvalidSample(String),

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),
}

impl GeneticError {
    /// Returns `true` for errors caused by invalid caller input.
    ///
    /// Numeric failures raised by a user objective (NaN, infinity) are not
    /// contract violations of the engine itself.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            GeneticError::FitnessCalculation(_) | GeneticError::InvalidNumericValue(_)
        )
    }
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error message.
///
/// This trait provides a convenient way to convert an `Option` to a `Result`
/// with a custom error message.
pub trait OptionExt<T> {
    /// Converts an Option to a Result with a custom error message.
    ///
    /// ## Arguments
    ///
    /// * `err_fn` - A closure that returns a `GeneticError`.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
