//! # Population
//!
//! Chromosomes, their raw objective values and their fitness live in three
//! parallel buffers that always share one order and one length.

use std::cmp::Ordering;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    objectives: Vec<f64>,
    fitness: Vec<f64>,
}

impl Population {
    /// Bundles the three buffers after checking that their lengths agree.
    pub fn new(chromosomes: Vec<Chromosome>, objectives: Vec<f64>, fitness: Vec<f64>) -> Result<Self> {
        if chromosomes.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        for (name, len) in [("objective", objectives.len()), ("fitness", fitness.len())] {
            if len != chromosomes.len() {
                return Err(GeneticError::Configuration(format!(
                    "{} vector length ({}) doesn't match population length ({})",
                    name,
                    len,
                    chromosomes.len()
                )));
            }
        }

        Ok(Self {
            chromosomes,
            objectives,
            fitness,
        })
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Replaces the fitness vector, e.g. with ranking fitness after a sort.
    pub fn set_fitness(&mut self, fitness: Vec<f64>) -> Result<()> {
        if fitness.len() != self.len() {
            return Err(GeneticError::Configuration(format!(
                "fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                self.len()
            )));
        }
        self.fitness = fitness;
        Ok(())
    }

    /// Overwrites one individual together with its objective value.
    pub(crate) fn replace(&mut self, index: usize, chromosome: Chromosome, objective: f64) {
        self.chromosomes[index] = chromosome;
        self.objectives[index] = objective;
    }

    /// Individual indices ordered by descending fitness.
    ///
    /// The sort is stable: individuals of equal fitness keep their relative order.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| descending(self.fitness[a], self.fitness[b]));
        order
    }

    /// Sorts all three buffers by descending fitness (stable).
    pub fn sort(&mut self) {
        let order = self.ranked_indices();
        if order.iter().enumerate().all(|(pos, &idx)| pos == idx) {
            return;
        }

        let mut chromosomes: Vec<Option<Chromosome>> =
            std::mem::take(&mut self.chromosomes).into_iter().map(Some).collect();
        self.chromosomes = order
            .iter()
            .filter_map(|&idx| chromosomes[idx].take())
            .collect();
        self.objectives = order.iter().map(|&idx| self.objectives[idx]).collect();
        self.fitness = order.iter().map(|&idx| self.fitness[idx]).collect();
    }

    /// Best chromosome and its objective; meaningful after [`Population::sort`].
    pub fn best(&self) -> (&Chromosome, f64) {
        (&self.chromosomes[0], self.objectives[0])
    }

    pub fn into_parts(self) -> (Vec<Chromosome>, Vec<f64>, Vec<f64>) {
        (self.chromosomes, self.objectives, self.fitness)
    }
}

// NaN sorts last.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| {
        if a.is_nan() && !b.is_nan() {
            Ordering::Greater
        } else if b.is_nan() && !a.is_nan() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}
