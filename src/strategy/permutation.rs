use std::collections::HashSet;

use crate::{
    chromosome::{Chromosome, Encoding},
    error::{GeneticError, Result},
    rng::{Pick, RandomSource},
};

use super::{check_parent_lengths, check_probability, BreedStrategy};

/// Order crossover (OX1) of two permutation chromosomes.
///
/// With probability `pc`, the slice `[cut1, cut2)` of `a` is copied to the
/// first child at the same positions; the remaining positions, starting at
/// `cut2` and wrapping around, are filled with the genes of `b` read from
/// `cut2` onwards (wrapping), skipping genes already copied. The second child
/// is built symmetrically. Both children are permutations of the parents'
/// values for every valid cut pair `1 <= cut1 < cut2 <= len`.
///
/// Random cuts draw `cut1` in `[1, len - 1]` and `cut2` in `[cut1 + 1, len]`.
///
/// # Errors
///
/// - `ChromosomeLength` when the parents differ in length or hold fewer than 2 genes
/// - `EncodingMismatch` when the parents are not permutations of one value set
/// - `InvalidCutPoints` for explicit cuts outside the valid range (including `cut1 == cut2`)
///
/// # Examples
///
/// ```
/// use simplega::rng::{Pick, RandomNumberGenerator};
/// use simplega::strategy::order_crossover;
///
/// let mut rng = RandomNumberGenerator::from_seed(1234);
/// let a = [1, 2, 3, 4, 5, 6, 7, 8];
/// let b = [2, 4, 6, 8, 7, 5, 3, 1];
///
/// let (x, y) = order_crossover(&a, &b, 1.0, Pick::Fixed((2, 5)), &mut rng).unwrap();
/// assert_eq!(x, vec![8, 7, 3, 4, 5, 1, 2, 6]);
/// assert_eq!(y, vec![4, 5, 6, 8, 7, 1, 2, 3]);
/// ```
pub fn order_crossover<R>(
    a: &[usize],
    b: &[usize],
    pc: f64,
    cuts: Pick<(usize, usize)>,
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)>
where
    R: RandomSource + ?Sized,
{
    let n = a.len();
    check_parent_lengths("order_crossover", n, b.len())?;
    check_min_len("order_crossover", n)?;
    check_same_values(a, b)?;
    if let Pick::Fixed((cut1, cut2)) = cuts {
        check_cuts("order_crossover", cut1, cut2, n)?;
    }

    if !rng.bernoulli(pc) {
        return Ok((a.to_vec(), b.to_vec()));
    }

    let (cut1, cut2) = cuts.resolve(|| draw_cuts(n, rng));
    Ok((
        order_child(a, b, cut1, cut2),
        order_child(b, a, cut1, cut2),
    ))
}

fn order_child(keep: &[usize], donor: &[usize], cut1: usize, cut2: usize) -> Vec<usize> {
    let n = keep.len();
    let copied: HashSet<usize> = keep[cut1..cut2].iter().copied().collect();

    let mut child = keep.to_vec();
    let mut pos = cut2 % n;
    for gene in (0..n).map(|k| donor[(cut2 + k) % n]) {
        if copied.contains(&gene) {
            continue;
        }
        child[pos] = gene;
        pos = (pos + 1) % n;
    }
    child
}

/// Displacement mutation of a permutation chromosome.
///
/// With probability `pm`, the sub-tour `u = c[cut1..cut2]` is removed, leaving
/// `v`, and re-inserted right after `v[ins]`. `ins` may range over
/// `[0, len(v)]`; any value from `len(v) - 1` on appends `u` at the end.
/// A random `ins` is drawn in `[0, len(v))`. The result is built from an
/// explicit old-index to new-index map, so it is always a reordering of `c`.
///
/// # Errors
///
/// - `ChromosomeLength` for fewer than 2 genes
/// - `InvalidCutPoints` for explicit cuts outside `1 <= cut1 < cut2 <= len`
/// - `InvalidInsertion` for an explicit `ins > len(v)`
///
/// # Examples
///
/// ```
/// use simplega::rng::{Pick, RandomNumberGenerator};
/// use simplega::strategy::displacement_mutation;
///
/// let mut rng = RandomNumberGenerator::from_seed(1234);
/// let c = vec![1, 2, 3, 4, 5, 6, 7, 8];
///
/// let m = displacement_mutation(c, 1.0, Pick::Fixed((2, 5)), Pick::Fixed(3), &mut rng).unwrap();
/// assert_eq!(m, vec![1, 2, 6, 7, 3, 4, 5, 8]);
/// ```
pub fn displacement_mutation<R>(
    c: Vec<usize>,
    pm: f64,
    cuts: Pick<(usize, usize)>,
    ins: Pick<usize>,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    R: RandomSource + ?Sized,
{
    let n = c.len();
    check_min_len("displacement_mutation", n)?;
    if let Pick::Fixed((cut1, cut2)) = cuts {
        check_cuts("displacement_mutation", cut1, cut2, n)?;
        if let Pick::Fixed(ins) = ins {
            check_insertion(ins, n - (cut2 - cut1))?;
        }
    }

    if !rng.bernoulli(pm) {
        return Ok(c);
    }

    let (cut1, cut2) = cuts.resolve(|| draw_cuts(n, rng));
    let remaining = n - (cut2 - cut1);
    let ins = ins.resolve(|| rng.gen_index(0, remaining));
    check_insertion(ins, remaining)?;

    // old positions in their new order
    let split = (ins + 1).min(remaining);
    let kept: Vec<usize> = (0..cut1).chain(cut2..n).collect();
    let order = kept[..split]
        .iter()
        .copied()
        .chain(cut1..cut2)
        .chain(kept[split..].iter().copied());

    Ok(order.map(|old| c[old]).collect())
}

fn draw_cuts<R>(n: usize, rng: &mut R) -> (usize, usize)
where
    R: RandomSource + ?Sized,
{
    let cut1 = rng.gen_index(1, n);
    let cut2 = rng.gen_index(cut1 + 1, n + 1);
    (cut1, cut2)
}

fn check_min_len(operator: &str, n: usize) -> Result<()> {
    if n < 2 {
        return Err(GeneticError::ChromosomeLength {
            context: format!("{} needs at least 2 genes", operator),
            expected: 2,
            found: n,
        });
    }
    Ok(())
}

fn check_cuts(operator: &'static str, cut1: usize, cut2: usize, len: usize) -> Result<()> {
    if cut1 < 1 || cut1 >= cut2 || cut2 > len {
        return Err(GeneticError::InvalidCutPoints {
            operator,
            cut1,
            cut2,
            len,
        });
    }
    Ok(())
}

fn check_insertion(ins: usize, len: usize) -> Result<()> {
    if ins > len {
        return Err(GeneticError::InvalidInsertion { ins, len });
    }
    Ok(())
}

fn check_same_values(a: &[usize], b: &[usize]) -> Result<()> {
    let mut sa = a.to_vec();
    let mut sb = b.to_vec();
    sa.sort_unstable();
    sb.sort_unstable();
    if sa != sb || sa.windows(2).any(|w| w[0] == w[1]) {
        return Err(GeneticError::EncodingMismatch(
            "order_crossover parents must be permutations of the same values".to_string(),
        ));
    }
    Ok(())
}

/// Operator set for [`Encoding::Permutation`] chromosomes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationStrategy {
    crossover_probability: f64,
    mutation_probability: f64,
}

impl PermutationStrategy {
    pub fn new(crossover_probability: f64, mutation_probability: f64) -> Result<Self> {
        check_probability("crossover probability", crossover_probability)?;
        check_probability("mutation probability", mutation_probability)?;
        Ok(Self {
            crossover_probability,
            mutation_probability,
        })
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

impl Default for PermutationStrategy {
    fn default() -> Self {
        Self {
            crossover_probability: 0.8,
            mutation_probability: 0.01,
        }
    }
}

impl BreedStrategy for PermutationStrategy {
    fn encoding(&self) -> Encoding {
        Encoding::Permutation
    }

    fn crossover(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut dyn RandomSource,
    ) -> Result<(Chromosome, Chromosome)> {
        let (x, y) = order_crossover(
            a.permutation_genes()?,
            b.permutation_genes()?,
            self.crossover_probability,
            Pick::Random,
            rng,
        )?;
        Ok((Chromosome::Permutation(x), Chromosome::Permutation(y)))
    }

    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RandomSource) -> Result<Chromosome> {
        displacement_mutation(
            chromosome.into_permutation()?,
            self.mutation_probability,
            Pick::Random,
            Pick::Random,
            rng,
        )
        .map(Chromosome::Permutation)
    }
}
