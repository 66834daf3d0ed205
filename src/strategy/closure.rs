use std::fmt;

use crate::{
    chromosome::{Chromosome, Encoding},
    error::Result,
    rng::RandomSource,
};

use super::BreedStrategy;

/// A breed strategy built from caller-supplied closures.
///
/// Each closure is usually bound to one of the provided operators with fixed
/// probabilities, but any operator honouring the encoding works.
///
/// # Examples
///
/// ```
/// use simplega::chromosome::{Chromosome, Encoding};
/// use simplega::rng::Pick;
/// use simplega::strategy::{displacement_mutation, order_crossover, FnStrategy};
///
/// let strategy = FnStrategy::new(
///     Encoding::Permutation,
///     |a: &Chromosome, b: &Chromosome, rng: &mut dyn simplega::rng::RandomSource| {
///         let (x, y) = order_crossover(a.permutation_genes()?, b.permutation_genes()?, 0.9, Pick::Random, rng)?;
///         Ok((Chromosome::Permutation(x), Chromosome::Permutation(y)))
///     },
///     |c: Chromosome, rng: &mut dyn simplega::rng::RandomSource| {
///         displacement_mutation(c.into_permutation()?, 0.05, Pick::Random, Pick::Random, rng)
///             .map(Chromosome::Permutation)
///     },
/// );
/// ```
pub struct FnStrategy<C, M> {
    encoding: Encoding,
    crossover: C,
    mutation: M,
}

impl<C, M> FnStrategy<C, M>
where
    C: Fn(&Chromosome, &Chromosome, &mut dyn RandomSource) -> Result<(Chromosome, Chromosome)>,
    M: Fn(Chromosome, &mut dyn RandomSource) -> Result<Chromosome>,
{
    pub fn new(encoding: Encoding, crossover: C, mutation: M) -> Self {
        Self {
            encoding,
            crossover,
            mutation,
        }
    }
}

impl<C, M> fmt::Debug for FnStrategy<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl<C, M> BreedStrategy for FnStrategy<C, M>
where
    C: Fn(&Chromosome, &Chromosome, &mut dyn RandomSource) -> Result<(Chromosome, Chromosome)>,
    M: Fn(Chromosome, &mut dyn RandomSource) -> Result<Chromosome>,
{
    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn crossover(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut dyn RandomSource,
    ) -> Result<(Chromosome, Chromosome)> {
        (self.crossover)(a, b, rng)
    }

    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RandomSource) -> Result<Chromosome> {
        (self.mutation)(chromosome, rng)
    }
}
