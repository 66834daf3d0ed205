//! # Selection
//!
//! Parent selection samples individual indices from a cumulative probability
//! table (see [`crate::fitness::ProbabilityTable`]) and pairs them for mating.
//!
//! - [`roulette_select`]: one independent uniform draw per selected parent.
//! - [`sus_select`]: stochastic universal sampling, one offset and `n` equally
//!   spaced pointers.
//! - [`filter_pairs`]: splits the sampled indices into mating pairs while
//!   avoiding self-pairing.

pub mod pairing;
pub mod roulette;
pub mod sus;

pub use pairing::filter_pairs;
pub use roulette::roulette_select;
pub use sus::sus_select;

use crate::error::Result;
use crate::fitness::ProbabilityTable;
use crate::rng::{Pick, RandomSource};

/// Which sampling scheme the evolution loop uses to pick parents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMethod {
    #[default]
    Roulette,
    StochasticUniversal,
}

impl SelectionMethod {
    /// Samples `n` indices from `table` with freshly drawn randomness.
    pub fn select<R>(&self, table: &ProbabilityTable, n: usize, rng: &mut R) -> Result<Vec<usize>>
    where
        R: RandomSource + ?Sized,
    {
        match self {
            SelectionMethod::Roulette => roulette_select(table.cumulative(), n, Pick::Random, rng),
            SelectionMethod::StochasticUniversal => {
                sus_select(table.cumulative(), n, Pick::Random, rng)
            }
        }
    }
}

/// Index of the first bin whose cumulative probability exceeds `point`,
/// scanning from `start`. Falls back to the last bin when round-off leaves
/// `cumulative[last]` slightly below the point.
pub(crate) fn first_bin_above(cumulative: &[f64], point: f64, start: usize) -> usize {
    cumulative[start..]
        .iter()
        .position(|&m| m > point)
        .map(|offset| start + offset)
        .unwrap_or(cumulative.len() - 1)
}
