use crate::error::{GeneticError, Result};
use crate::rng::{Pick, RandomSource};

use super::first_bin_above;

/// Roulette wheel selection of `n` indices.
///
/// Each sample `s` (drawn uniformly in `[0, 1)` or given explicitly) selects
/// the first index `j` with `cumulative[j] > s`. The scan is linear per sample,
/// which is fine for populations of tens to a few hundred individuals.
///
/// # Errors
///
/// - `EmptyPopulation` for an empty table
/// - `InvalidSample` when explicit samples do not number `n`
///
/// # Examples
///
/// ```
/// use simplega::rng::{Pick, RandomNumberGenerator};
/// use simplega::selection::roulette_select;
///
/// let cumulative = [0.5, 0.75, 1.0];
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let picked = roulette_select(&cumulative, 3, Pick::Fixed(&[0.1, 0.6, 0.9][..]), &mut rng).unwrap();
/// assert_eq!(picked, vec![0, 1, 2]);
/// ```
pub fn roulette_select<R>(
    cumulative: &[f64],
    n: usize,
    samples: Pick<&[f64]>,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    R: RandomSource + ?Sized,
{
    if cumulative.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let samples = match samples {
        Pick::Fixed(given) => {
            if given.len() != n {
                return Err(GeneticError::InvalidSample(format!(
                    "roulette selection of {} individuals got {} samples",
                    n,
                    given.len()
                )));
            }
            given.to_vec()
        }
        Pick::Random => rng.uniform_float(n, 0.0, 1.0),
    };

    Ok(samples
        .iter()
        .map(|&s| first_bin_above(cumulative, s, 0))
        .collect())
}
