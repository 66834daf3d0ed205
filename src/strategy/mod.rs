//! # BreedStrategy
//!
//! A breed strategy is the operator set (one crossover, one mutation) bound to
//! a chromosome encoding when the evolution launcher is constructed. The
//! launcher checks that the initial population carries the same encoding, so
//! operators never have to guess the gene type at runtime.
//!
//! - [`ContinuousStrategy`]: single point crossover and max-proportional
//!   perturbation for real-valued genes.
//! - [`PermutationStrategy`]: order crossover (OX1) and displacement mutation
//!   for tours.
//! - [`FnStrategy`]: caller-supplied closures.
pub mod closure;
pub mod continuous;
pub mod permutation;

use std::fmt::Debug;

use crate::{
    chromosome::{Chromosome, Encoding},
    error::{GeneticError, Result},
    rng::RandomSource,
};

/// The variation operators applied to every mating pair.
pub trait BreedStrategy: Debug {
    /// The encoding these operators work on.
    fn encoding(&self) -> Encoding;

    /// Recombines two parents into two offspring.
    ///
    /// ## Errors
    ///
    /// Fails when the parents violate the operator's contract (wrong encoding,
    /// mismatched lengths, invalid explicit parameters).
    fn crossover(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut dyn RandomSource,
    ) -> Result<(Chromosome, Chromosome)>;

    /// Mutates one offspring, returning it changed or unchanged.
    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RandomSource) -> Result<Chromosome>;
}

pub use closure::FnStrategy;
pub use continuous::{
    float_crossover, float_crossover_at, float_mutation, ContinuousStrategy,
    DEFAULT_MUTATION_COEFFICIENT,
};
pub use permutation::{displacement_mutation, order_crossover, PermutationStrategy};

pub(crate) fn check_probability(name: &str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GeneticError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, p
        )));
    }
    Ok(())
}

pub(crate) fn check_parent_lengths(operator: &str, a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(GeneticError::ChromosomeLength {
            context: operator.to_string(),
            expected: a,
            found: b,
        });
    }
    Ok(())
}
