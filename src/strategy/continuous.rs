use crate::{
    chromosome::{Chromosome, Encoding},
    error::{GeneticError, Result},
    rng::RandomSource,
};

use super::{check_parent_lengths, check_probability, BreedStrategy};

/// Scale of the mutation step relative to the largest gene.
pub const DEFAULT_MUTATION_COEFFICIENT: f64 = 1.1;

/// Single point crossover of two real-valued chromosomes.
///
/// With probability `pc` a cut position is drawn uniformly in `[1, len - 1]`
/// and the tails are swapped; otherwise the offspring are copies of the
/// parents.
pub fn float_crossover<R>(a: &[f64], b: &[f64], pc: f64, rng: &mut R) -> Result<(Vec<f64>, Vec<f64>)>
where
    R: RandomSource + ?Sized,
{
    check_parent_lengths("float_crossover", a.len(), b.len())?;
    if a.len() < 2 {
        return Err(GeneticError::ChromosomeLength {
            context: "float_crossover needs at least 2 genes".to_string(),
            expected: 2,
            found: a.len(),
        });
    }

    if !rng.bernoulli(pc) {
        return Ok((a.to_vec(), b.to_vec()));
    }
    let pos = rng.gen_index(1, a.len());
    float_crossover_at(a, b, pos)
}

/// Swaps the tails of `a` and `b` from `pos` on.
///
/// # Examples
///
/// ```
/// use simplega::strategy::float_crossover_at;
///
/// let (a, b) = float_crossover_at(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 1).unwrap();
/// assert_eq!(a, vec![1.0, 5.0, 6.0]);
/// assert_eq!(b, vec![4.0, 2.0, 3.0]);
/// ```
pub fn float_crossover_at(a: &[f64], b: &[f64], pos: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    check_parent_lengths("float_crossover", a.len(), b.len())?;
    if pos == 0 || pos >= a.len() {
        return Err(GeneticError::InvalidCutPoints {
            operator: "float_crossover",
            cut1: pos,
            cut2: pos,
            len: a.len(),
        });
    }

    let child_a = a[..pos].iter().chain(&b[pos..]).copied().collect();
    let child_b = b[..pos].iter().chain(&a[pos..]).copied().collect();
    Ok((child_a, child_b))
}

/// Perturbs one random gene by `±coef * max(c)` with probability `pm`.
///
/// The step is proportional to the current largest gene, not fixed.
pub fn float_mutation<R>(mut c: Vec<f64>, pm: f64, coef: f64, rng: &mut R) -> Result<Vec<f64>>
where
    R: RandomSource + ?Sized,
{
    if c.is_empty() {
        return Err(GeneticError::ChromosomeLength {
            context: "float_mutation needs at least 1 gene".to_string(),
            expected: 1,
            found: 0,
        });
    }

    if rng.bernoulli(pm) {
        let bmax = c.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pos = rng.gen_index(0, c.len());
        if rng.bernoulli(0.5) {
            c[pos] += bmax * coef;
        } else {
            c[pos] -= bmax * coef;
        }
    }
    Ok(c)
}

/// Operator set for [`Encoding::Continuous`] chromosomes.
///
/// # Examples
///
/// ```
/// use simplega::strategy::ContinuousStrategy;
///
/// let strategy = ContinuousStrategy::new(0.8, 0.01).unwrap().with_coefficient(1.5);
/// assert_eq!(strategy.crossover_probability(), 0.8);
/// assert!(ContinuousStrategy::new(1.2, 0.01).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousStrategy {
    crossover_probability: f64,
    mutation_probability: f64,
    mutation_coefficient: f64,
}

impl ContinuousStrategy {
    pub fn new(crossover_probability: f64, mutation_probability: f64) -> Result<Self> {
        check_probability("crossover probability", crossover_probability)?;
        check_probability("mutation probability", mutation_probability)?;
        Ok(Self {
            crossover_probability,
            mutation_probability,
            mutation_coefficient: DEFAULT_MUTATION_COEFFICIENT,
        })
    }

    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.mutation_coefficient = coefficient;
        self
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn mutation_coefficient(&self) -> f64 {
        self.mutation_coefficient
    }
}

impl Default for ContinuousStrategy {
    fn default() -> Self {
        Self {
            crossover_probability: 0.8,
            mutation_probability: 0.01,
            mutation_coefficient: DEFAULT_MUTATION_COEFFICIENT,
        }
    }
}

impl BreedStrategy for ContinuousStrategy {
    fn encoding(&self) -> Encoding {
        Encoding::Continuous
    }

    fn crossover(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut dyn RandomSource,
    ) -> Result<(Chromosome, Chromosome)> {
        let (x, y) = float_crossover(
            a.continuous_genes()?,
            b.continuous_genes()?,
            self.crossover_probability,
            rng,
        )?;
        Ok((Chromosome::Continuous(x), Chromosome::Continuous(y)))
    }

    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RandomSource) -> Result<Chromosome> {
        float_mutation(
            chromosome.into_continuous()?,
            self.mutation_probability,
            self.mutation_coefficient,
            rng,
        )
        .map(Chromosome::Continuous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_float_crossover_without_coin_copies() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];

        let (x, y) = float_crossover(&a, &b, 0.0, &mut rng).unwrap();
        assert_eq!(x, a.to_vec());
        assert_eq!(y, b.to_vec());
    }

    #[test]
    fn test_float_crossover_swaps_tails() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [-1.0, -2.0, -3.0, -4.0, -5.0];

        for _ in 0..50 {
            let (x, y) = float_crossover(&a, &b, 1.0, &mut rng).unwrap();
            // exactly one sign change, never at position 0 or after the end
            let pos = x.iter().position(|&g| g < 0.0).unwrap();
            assert!((1..a.len()).contains(&pos));
            assert_eq!(&x[..pos], &a[..pos]);
            assert_eq!(&x[pos..], &b[pos..]);
            assert_eq!(&y[..pos], &b[..pos]);
            assert_eq!(&y[pos..], &a[pos..]);
        }
    }

    #[test]
    fn test_float_crossover_two_genes() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let (x, y) = float_crossover(&[1.0, 2.0], &[3.0, 4.0], 1.0, &mut rng).unwrap();
        assert_eq!(x, vec![1.0, 4.0]);
        assert_eq!(y, vec![3.0, 2.0]);
    }

    #[test]
    fn test_float_crossover_contract() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(float_crossover(&[1.0, 2.0], &[1.0], 1.0, &mut rng).is_err());
        assert!(float_crossover(&[1.0], &[2.0], 1.0, &mut rng).is_err());
        assert!(float_crossover_at(&[1.0, 2.0], &[3.0, 4.0], 0).is_err());
        assert!(float_crossover_at(&[1.0, 2.0], &[3.0, 4.0], 2).is_err());
    }

    #[test]
    fn test_float_mutation_changes_one_gene_by_scaled_max() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let c = vec![0.5, 2.0, 1.0];

        let m = float_mutation(c.clone(), 1.0, 1.1, &mut rng).unwrap();
        let changed: Vec<usize> = (0..c.len()).filter(|&i| m[i] != c[i]).collect();
        assert_eq!(changed.len(), 1);
        let delta = (m[changed[0]] - c[changed[0]]).abs();
        assert!((delta - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_float_mutation_zero_probability() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let c = vec![0.5, 2.0, 1.0];
        assert_eq!(float_mutation(c.clone(), 0.0, 1.1, &mut rng).unwrap(), c);
        assert!(float_mutation(Vec::new(), 1.0, 1.1, &mut rng).is_err());
    }

    #[test]
    fn test_strategy_rejects_permutation_chromosomes() {
        let strategy = ContinuousStrategy::default();
        let mut rng = RandomNumberGenerator::from_seed(5);
        let tour = Chromosome::Permutation(vec![0, 1, 2]);

        assert!(matches!(
            strategy.crossover(&tour, &tour, &mut rng),
            Err(GeneticError::EncodingMismatch(_))
        ));
        assert!(strategy.mutate(tour, &mut rng).is_err());
    }
}
