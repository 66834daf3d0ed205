//! # Chromosome
//!
//! A chromosome is one encoded candidate solution: an ordered, fixed-length
//! sequence of genes. Two encoding families are supported and carried as an
//! explicit tag rather than inferred from the gene type at runtime:
//!
//! - [`Encoding::Continuous`]: real-valued genes. A domain value is usually
//!   represented by a group of genes whose sum is the value (see
//!   [`simple_chromo`]).
//! - [`Encoding::Permutation`]: unique integer indices, for instance the visiting
//!   order of a travelling salesman tour.
//!
//! ## Example
//!
//! ```rust
//! use simplega::chromosome::{simple_chromo, Chromosome, Encoding};
//! use simplega::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1111);
//! let genes = simple_chromo(3.0, 5, &mut rng).unwrap();
//! let chromo = Chromosome::Continuous(genes);
//!
//! assert_eq!(chromo.encoding(), Encoding::Continuous);
//! assert_eq!(chromo.len(), 5);
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;

/// The encoding family of a chromosome.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Continuous,
    Permutation,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Continuous => write!(f, "continuous"),
            Encoding::Permutation => write!(f, "permutation"),
        }
    }
}

/// One individual of the population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Chromosome {
    Continuous(Vec<f64>),
    Permutation(Vec<usize>),
}

impl Chromosome {
    pub fn encoding(&self) -> Encoding {
        match self {
            Chromosome::Continuous(_) => Encoding::Continuous,
            Chromosome::Permutation(_) => Encoding::Permutation,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        match self {
            Chromosome::Continuous(genes) => genes.len(),
            Chromosome::Permutation(genes) => genes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            Chromosome::Continuous(genes) => Some(genes),
            Chromosome::Permutation(_) => None,
        }
    }

    pub fn as_permutation(&self) -> Option<&[usize]> {
        match self {
            Chromosome::Permutation(genes) => Some(genes),
            Chromosome::Continuous(_) => None,
        }
    }

    /// Borrows the real-valued genes or fails with an encoding mismatch.
    pub fn continuous_genes(&self) -> Result<&[f64]> {
        self.as_continuous().ok_or_else(|| {
            GeneticError::EncodingMismatch(format!(
                "expected a continuous chromosome, found {}",
                self.encoding()
            ))
        })
    }

    /// Borrows the permutation genes or fails with an encoding mismatch.
    pub fn permutation_genes(&self) -> Result<&[usize]> {
        self.as_permutation().ok_or_else(|| {
            GeneticError::EncodingMismatch(format!(
                "expected a permutation chromosome, found {}",
                self.encoding()
            ))
        })
    }

    pub fn into_continuous(self) -> Result<Vec<f64>> {
        match self {
            Chromosome::Continuous(genes) => Ok(genes),
            other => Err(GeneticError::EncodingMismatch(format!(
                "expected a continuous chromosome, found {}",
                other.encoding()
            ))),
        }
    }

    pub fn into_permutation(self) -> Result<Vec<usize>> {
        match self {
            Chromosome::Permutation(genes) => Ok(genes),
            other => Err(GeneticError::EncodingMismatch(format!(
                "expected a permutation chromosome, found {}",
                other.encoding()
            ))),
        }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chromosome::Continuous(genes) => {
                let parts: Vec<String> = genes.iter().map(|g| format!("{:.6}", g)).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Chromosome::Permutation(genes) => {
                let parts: Vec<String> = genes.iter().map(|g| g.to_string()).collect();
                write!(f, "{}", parts.join("-"))
            }
        }
    }
}

/// Checks that a set of chromosomes can form one population.
///
/// Returns the common encoding and chromosome length.
///
/// # Errors
///
/// - `EmptyPopulation` when `chromosomes` is empty
/// - `EncodingMismatch` when encodings are mixed
/// - `ChromosomeLength` when lengths differ
pub fn check_uniform(chromosomes: &[Chromosome]) -> Result<(Encoding, usize)> {
    let first = chromosomes.first().ok_or(GeneticError::EmptyPopulation)?;
    let encoding = first.encoding();
    let nbases = first.len();

    for (index, chromo) in chromosomes.iter().enumerate().skip(1) {
        if chromo.encoding() != encoding {
            return Err(GeneticError::EncodingMismatch(format!(
                "individual {} is {} but individual 0 is {}",
                index,
                chromo.encoding(),
                encoding
            )));
        }
        if chromo.len() != nbases {
            return Err(GeneticError::ChromosomeLength {
                context: format!("population (individual {})", index),
                expected: nbases,
                found: chromo.len(),
            });
        }
    }

    Ok((encoding, nbases))
}

/// Splits `x` into `nbases` random non-negative parts whose sum is `x`.
///
/// The last part absorbs the rounding residue so the sum matches `x` to within a
/// couple of ulps.
pub fn simple_chromo<R>(x: f64, nbases: usize, rng: &mut R) -> Result<Vec<f64>>
where
    R: RandomSource + ?Sized,
{
    if nbases == 0 {
        return Err(GeneticError::Configuration(
            "simple_chromo needs at least one base".to_string(),
        ));
    }
    if !x.is_finite() {
        return Err(GeneticError::InvalidNumericValue(format!(
            "cannot split non-finite value {}",
            x
        )));
    }

    let vals = rng.uniform_float(nbases, 0.0, 1.0);
    let sumv: f64 = vals.iter().sum();
    if sumv <= 0.0 {
        // every draw was exactly zero
        return Ok(std::iter::once(x)
            .chain(std::iter::repeat(0.0).take(nbases - 1))
            .collect());
    }

    let mut parts: Vec<f64> = vals.iter().map(|v| x * v / sumv).collect();
    let head: f64 = parts[..nbases - 1].iter().sum();
    parts[nbases - 1] = x - head;
    Ok(parts)
}

/// Applies [`simple_chromo`] to every element of `xs` and concatenates the groups.
pub fn simple_chromo_multi<R>(xs: &[f64], nbases: usize, rng: &mut R) -> Result<Vec<f64>>
where
    R: RandomSource + ?Sized,
{
    let mut genes = Vec::with_capacity(xs.len() * nbases);
    for &x in xs {
        genes.extend(simple_chromo(x, nbases, rng)?);
    }
    Ok(genes)
}

/// Builds a continuous population, one chromosome per value in `xs`.
pub fn continuous_population<R>(xs: &[f64], nbases: usize, rng: &mut R) -> Result<Vec<Chromosome>>
where
    R: RandomSource + ?Sized,
{
    xs.iter()
        .map(|&x| simple_chromo(x, nbases, rng).map(Chromosome::Continuous))
        .collect()
}

/// Builds `ninds` random tours over `0..n` by shuffling.
pub fn random_permutation_population<R>(ninds: usize, n: usize, rng: &mut R) -> Vec<Chromosome>
where
    R: RandomSource + ?Sized,
{
    (0..ninds)
        .map(|_| {
            let mut tour: Vec<usize> = (0..n).collect();
            rng.shuffle(&mut tour);
            Chromosome::Permutation(tour)
        })
        .collect()
}

/// Returns `true` when `genes` is a permutation of `0..genes.len()`.
pub fn is_permutation(genes: &[usize]) -> bool {
    let mut seen = vec![false; genes.len()];
    for &g in genes {
        match seen.get_mut(g) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_simple_chromo_sums_to_value() {
        let mut rng = RandomNumberGenerator::from_seed(1111);
        for &x in &[0.0, 0.5, 1.0, 3.7, 4.0 * std::f64::consts::PI] {
            let c = simple_chromo(x, 5, &mut rng).unwrap();
            assert_eq!(c.len(), 5);
            let sum: f64 = c.iter().sum();
            assert!((sum - x).abs() < 1e-14, "sum {} != {}", sum, x);
        }
    }

    #[test]
    fn test_simple_chromo_parts_are_non_negative() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let c = simple_chromo(2.5, 8, &mut rng).unwrap();
        assert!(c.iter().all(|&g| g >= -1e-15));
    }

    #[test]
    fn test_simple_chromo_multi_groups() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let xs = [1.0, 2.0, 3.0];
        let c = simple_chromo_multi(&xs, 4, &mut rng).unwrap();

        assert_eq!(c.len(), 12);
        for (group, &x) in c.chunks(4).zip(xs.iter()) {
            let sum: f64 = group.iter().sum();
            assert!((sum - x).abs() < 1e-14);
        }
    }

    #[test]
    fn test_simple_chromo_zero_bases() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        assert!(simple_chromo(1.0, 0, &mut rng).is_err());
    }

    #[test]
    fn test_random_permutation_population() {
        let mut rng = RandomNumberGenerator::from_seed(1234);
        let pop = random_permutation_population(6, 20, &mut rng);

        assert_eq!(pop.len(), 6);
        for chromo in &pop {
            assert_eq!(chromo.encoding(), Encoding::Permutation);
            assert!(is_permutation(chromo.as_permutation().unwrap()));
        }
    }

    #[test]
    fn test_check_uniform() {
        let ok = vec![
            Chromosome::Permutation(vec![0, 1, 2]),
            Chromosome::Permutation(vec![2, 1, 0]),
        ];
        assert_eq!(check_uniform(&ok).unwrap(), (Encoding::Permutation, 3));

        let mixed_len = vec![
            Chromosome::Continuous(vec![0.0, 1.0]),
            Chromosome::Continuous(vec![0.0]),
        ];
        assert!(matches!(
            check_uniform(&mixed_len),
            Err(GeneticError::ChromosomeLength { expected: 2, found: 1, .. })
        ));

        let mixed_enc = vec![
            Chromosome::Continuous(vec![0.0, 1.0]),
            Chromosome::Permutation(vec![0, 1]),
        ];
        assert!(matches!(
            check_uniform(&mixed_enc),
            Err(GeneticError::EncodingMismatch(_))
        ));

        assert_eq!(check_uniform(&[]), Err(GeneticError::EmptyPopulation));
    }

    #[test]
    fn test_display() {
        let tour = Chromosome::Permutation(vec![3, 0, 2, 1]);
        assert_eq!(tour.to_string(), "3-0-2-1");
        assert_eq!(Chromosome::Continuous(vec![0.5]).to_string(), "[0.500000]");
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[2, 2, 1]));
        assert!(!is_permutation(&[0, 3, 1]));
        assert!(is_permutation(&[]));
    }
}
