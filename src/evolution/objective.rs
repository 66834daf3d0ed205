use crate::chromosome::Chromosome;

/// The function being minimised, plus how to show a chromosome in logs.
pub trait Objective {
    /// Raw objective value, lower is better.
    fn evaluate(&self, chromosome: &Chromosome) -> f64;

    /// Human readable form of a chromosome, for reporting only.
    fn display(&self, chromosome: &Chromosome) -> String {
        chromosome.to_string()
    }
}

/// An [`Objective`] made of closures.
///
/// # Examples
///
/// ```
/// use simplega::chromosome::Chromosome;
/// use simplega::evolution::{FnObjective, Objective};
///
/// let objective = FnObjective::new(|c: &Chromosome| c.as_continuous().map_or(0.0, |g| g.iter().sum()))
///     .with_display(|c: &Chromosome| format!("x={}", c.as_continuous().map_or(0.0, |g| g.iter().sum::<f64>())));
///
/// let c = Chromosome::Continuous(vec![1.0, 2.0]);
/// assert_eq!(objective.evaluate(&c), 3.0);
/// assert_eq!(objective.display(&c), "x=3");
/// ```
#[derive(Debug, Clone)]
pub struct FnObjective<F, D = fn(&Chromosome) -> String> {
    objective: F,
    display: D,
}

fn default_display(chromosome: &Chromosome) -> String {
    chromosome.to_string()
}

impl<F> FnObjective<F>
where
    F: Fn(&Chromosome) -> f64,
{
    pub fn new(objective: F) -> Self {
        Self {
            objective,
            display: default_display,
        }
    }
}

impl<F, D> FnObjective<F, D>
where
    F: Fn(&Chromosome) -> f64,
    D: Fn(&Chromosome) -> String,
{
    /// Replaces the display function.
    pub fn with_display<D2>(self, display: D2) -> FnObjective<F, D2>
    where
        D2: Fn(&Chromosome) -> String,
    {
        FnObjective {
            objective: self.objective,
            display,
        }
    }
}

impl<F, D> Objective for FnObjective<F, D>
where
    F: Fn(&Chromosome) -> f64,
    D: Fn(&Chromosome) -> String,
{
    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        (self.objective)(chromosome)
    }

    fn display(&self, chromosome: &Chromosome) -> String {
        (self.display)(chromosome)
    }
}
