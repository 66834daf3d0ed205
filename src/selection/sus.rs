use crate::error::{GeneticError, Result};
use crate::rng::{Pick, RandomSource};

use super::first_bin_above;

/// Stochastic universal sampling of `n` indices.
///
/// One offset `pb` in `[0, 1/n)` (drawn or given) defines the pointers
/// `pb + i/n`. Because the pointers and the cumulative table both increase,
/// the bin index only ever moves forward, so the whole pass costs
/// `O(n + ninds)`. The result is ordered by pointer, hence non-decreasing.
///
/// # Errors
///
/// - `EmptyPopulation` for an empty table
/// - `InvalidSample` for an explicit offset outside `[0, 1/n)`
pub fn sus_select<R>(cumulative: &[f64], n: usize, offset: Pick<f64>, rng: &mut R) -> Result<Vec<usize>>
where
    R: RandomSource + ?Sized,
{
    if cumulative.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let spacing = 1.0 / n as f64;
    let pb = match offset {
        Pick::Fixed(pb) => {
            if !(0.0..spacing).contains(&pb) {
                return Err(GeneticError::InvalidSample(format!(
                    "SUS offset {} outside [0, {})",
                    pb, spacing
                )));
            }
            pb
        }
        Pick::Random => rng.next_f64() * spacing,
    };

    let mut selected = Vec::with_capacity(n);
    let mut bin = 0;
    for i in 0..n {
        let pointer = pb + i as f64 * spacing;
        bin = first_bin_above(cumulative, pointer, bin);
        selected.push(bin);
    }
    Ok(selected)
}
