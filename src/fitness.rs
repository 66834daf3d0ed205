//! # Fitness
//!
//! Maps raw objective values (lower is better) to a fitness that selection
//! maximises, and derives the probability tables sampled by the selection
//! operators.
//!
//! ## Example
//!
//! ```rust
//! use simplega::fitness::{fitness, ProbabilityTable};
//!
//! let f = fitness(&[3.0, 1.0, 2.0]).unwrap();
//! assert_eq!(f, vec![0.0, 1.0, 0.5]);
//!
//! let table = ProbabilityTable::new(&f).unwrap();
//! assert!((table.cumulative().last().unwrap() - 1.0).abs() < 1e-12);
//! ```

use tracing::warn;

use crate::error::{GeneticError, Result};

/// Objective spreads below this are treated as "all individuals equal".
pub const DEGENERATE_SPREAD: f64 = 1e-14;

/// Selective pressure substituted when the requested one is outside `[1, 2]`.
pub const DEFAULT_RANKING_PRESSURE: f64 = 1.2;

/// How raw objective values are turned into selection fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitnessScaling {
    /// `(ymax - y) / (ymax - ymin)`.
    #[default]
    Linear,
    /// Linear ranking on the sorted population.
    Ranking,
}

/// Linearly rescales objective values into `[0, 1]`, best individual at 1.
///
/// When every value is the same (spread below [`DEGENERATE_SPREAD`]) all
/// individuals get fitness 1.
pub fn fitness(objectives: &[f64]) -> Result<Vec<f64>> {
    if objectives.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    if let Some(bad) = objectives.iter().find(|y| !y.is_finite()) {
        return Err(GeneticError::FitnessCalculation(format!(
            "Non-finite objective value encountered: {}",
            bad
        )));
    }

    let ymin = objectives.iter().copied().fold(f64::INFINITY, f64::min);
    let ymax = objectives.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = ymax - ymin;

    if spread.abs() < DEGENERATE_SPREAD {
        return Ok(vec![1.0; objectives.len()]);
    }
    if !spread.is_finite() {
        // range wider than f64::MAX: halve everything so the difference is representable
        let half_spread = ymax / 2.0 - ymin / 2.0;
        return Ok(objectives
            .iter()
            .map(|y| (ymax / 2.0 - y / 2.0) / half_spread)
            .collect());
    }
    Ok(objectives.iter().map(|y| (ymax - y) / spread).collect())
}

/// Linear ranking fitness for a population already sorted best first.
///
/// `F_i = 2 - sp + 2 (sp - 1) (ninds - i - 1) / (ninds - 1)`, so the best
/// individual gets `sp` and the worst `2 - sp`. A pressure outside `[1, 2]`
/// is replaced by [`DEFAULT_RANKING_PRESSURE`].
pub fn ranking(ninds: usize, selective_pressure: f64) -> Result<Vec<f64>> {
    if ninds == 0 {
        return Err(GeneticError::EmptyPopulation);
    }

    let sp = if (1.0..=2.0).contains(&selective_pressure) {
        selective_pressure
    } else {
        warn!(
            requested = selective_pressure,
            substituted = DEFAULT_RANKING_PRESSURE,
            "ranking pressure outside [1, 2]"
        );
        DEFAULT_RANKING_PRESSURE
    };

    if ninds == 1 {
        return Ok(vec![1.0]);
    }

    let last = (ninds - 1) as f64;
    Ok((0..ninds)
        .map(|i| 2.0 - sp + 2.0 * (sp - 1.0) * (ninds - i - 1) as f64 / last)
        .collect())
}

/// Normalised selection probabilities and their running sum.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl ProbabilityTable {
    /// Builds `P = F / sum(F)` and `M = cumsum(P)`.
    ///
    /// # Errors
    ///
    /// Fails on an empty vector and on negative, non-finite or all-zero fitness.
    pub fn new(fitness: &[f64]) -> Result<Self> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if fitness.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(GeneticError::FitnessCalculation(
                "Selection requires finite, non-negative fitness values".to_string(),
            ));
        }

        let total: f64 = fitness.iter().sum();
        if total <= 0.0 {
            return Err(GeneticError::FitnessCalculation(
                "Selection requires at least one individual with non-zero fitness".to_string(),
            ));
        }

        let probabilities: Vec<f64> = fitness.iter().map(|f| f / total).collect();
        let cumulative = probabilities
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();

        Ok(Self {
            probabilities,
            cumulative,
        })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}
