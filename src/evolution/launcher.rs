use tracing::{debug, info};

use super::{
    objective::{FnObjective, Objective},
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    chromosome::{check_uniform, Chromosome, Encoding},
    error::{GeneticError, OptionExt, Result},
    fitness::{fitness, ranking, FitnessScaling, ProbabilityTable},
    population::Population,
    rng::RandomSource,
    selection::filter_pairs,
    strategy::{BreedStrategy, FnStrategy},
};
use rayon::prelude::*;

/// Represents the result of an evolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Final population, best first.
    pub chromosomes: Vec<Chromosome>,
    /// Objective values of `chromosomes`, same order.
    pub objectives: Vec<f64>,
    /// Best objective of every generation, initial population included
    /// (`num_generations + 1` entries).
    pub best_trace: Vec<f64>,
}

impl EvolutionResult {
    /// The best individual of the final population and its objective value.
    pub fn best(&self) -> Option<(&Chromosome, f64)> {
        self.chromosomes.first().zip(self.objectives.first().copied())
    }
}

/// Manages the evolution process using a breed strategy and an objective.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Strategy, Obj>
where
    Strategy: BreedStrategy,
    Obj: Objective,
{
    strategy: Strategy,
    objective: Obj,
}

impl<Strategy, Obj> EvolutionLauncher<Strategy, Obj>
where
    Strategy: BreedStrategy,
    Obj: Objective + Sync,
{
    /// Creates a new `EvolutionLauncher` binding an operator set to an objective.
    pub fn new(strategy: Strategy, objective: Obj) -> Self {
        Self {
            strategy,
            objective,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Runs `options.get_num_generations()` generations on `initial`.
    ///
    /// # Arguments
    ///
    /// * `options` - Evolution options controlling the run.
    /// * `initial` - The initial population; its size is kept for the whole run.
    /// * `rng` - The random source; all draws happen in a fixed sequential order.
    ///
    /// # Returns
    ///
    /// The final population sorted best first, its objective values and the
    /// best objective of every generation.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The population is empty, has an odd size, or mixes lengths or encodings
    /// - The population encoding differs from the strategy's encoding
    /// - An objective value is NaN or infinite
    /// - A variation operator rejects its input or produces malformed offspring
    ///
    /// # Performance
    ///
    /// Objective values are computed with Rayon once the population reaches the
    /// parallel threshold. Evaluation draws no randomness, so results do not
    /// depend on the threshold.
    pub fn evolve<R>(
        &self,
        options: &EvolutionOptions,
        initial: Vec<Chromosome>,
        rng: &mut R,
    ) -> Result<EvolutionResult>
    where
        R: RandomSource,
    {
        let (encoding, nbases) = check_uniform(&initial)?;
        if encoding != self.strategy.encoding() {
            return Err(GeneticError::EncodingMismatch(format!(
                "population is {} but the breed strategy expects {}",
                encoding,
                self.strategy.encoding()
            )));
        }
        let ninds = initial.len();
        if ninds % 2 != 0 {
            return Err(GeneticError::OddPopulation(ninds));
        }

        let objectives = self.evaluate(&initial, options)?;
        let linear = fitness(&objectives)?;
        let mut population = Population::new(initial, objectives, linear)?;
        population.sort();
        let mut table = self.rescale(&mut population, options)?;

        let mut best_trace = Vec::with_capacity(options.get_num_generations() + 1);
        best_trace.push(population.best().1);

        for generation in 0..options.get_num_generations() {
            let (best_chromosome, best_objective) = {
                let (c, y) = population.best();
                (c.clone(), y)
            };
            self.report(generation, &population, options);

            let selected = options.get_selection().select(&table, ninds, rng)?;
            let (first, second) = filter_pairs(&selected);

            let mut offspring = Vec::with_capacity(ninds);
            for (&ia, &ib) in first.iter().zip(second.iter()) {
                let parents = population.chromosomes();
                let (a, b) = self.strategy.crossover(&parents[ia], &parents[ib], rng)?;
                offspring.push(self.strategy.mutate(a, rng)?);
                offspring.push(self.strategy.mutate(b, rng)?);
            }
            self.check_offspring(&offspring, encoding, nbases, generation)?;

            let objectives = self.evaluate(&offspring, options)?;
            let linear = fitness(&objectives)?;
            let mut next = Population::new(offspring, objectives, linear)?;

            if options.get_elitism() {
                let order = next.ranked_indices();
                let best = order[0];
                let worst = order[ninds - 1];
                let objectives = next.objectives();
                if best_objective < objectives[best] && best_objective < objectives[worst] {
                    debug!(
                        generation,
                        elite = best_objective,
                        replaced = objectives[worst],
                        "re-inserting elite"
                    );
                    next.replace(worst, best_chromosome, best_objective);
                    let linear = fitness(next.objectives())?;
                    next.set_fitness(linear)?;
                }
            }

            next.sort();
            table = self.rescale(&mut next, options)?;
            population = next;
            best_trace.push(population.best().1);
        }

        if !matches!(options.get_log_level(), LogLevel::None) {
            let (best, y) = population.best();
            info!(
                generations = options.get_num_generations(),
                best = %self.objective.display(best),
                objective = y,
                "evolution finished"
            );
        }

        let (chromosomes, objectives, _) = population.into_parts();
        Ok(EvolutionResult {
            chromosomes,
            objectives,
            best_trace,
        })
    }

    fn evaluate(&self, chromosomes: &[Chromosome], options: &EvolutionOptions) -> Result<Vec<f64>> {
        let objective = &self.objective;
        let score = |(index, chromosome): (usize, &Chromosome)| {
            let y = objective.evaluate(chromosome);
            if !y.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite objective value {} for individual {}",
                    y, index
                )));
            }
            Ok(y)
        };

        if chromosomes.len() >= options.get_parallel_threshold() {
            chromosomes.par_iter().enumerate().map(score).collect()
        } else {
            chromosomes.iter().enumerate().map(score).collect()
        }
    }

    /// Applies ranking if configured and rebuilds the selection table.
    fn rescale(
        &self,
        population: &mut Population,
        options: &EvolutionOptions,
    ) -> Result<ProbabilityTable> {
        if options.get_fitness_scaling() == FitnessScaling::Ranking {
            population.set_fitness(ranking(population.len(), options.get_ranking_pressure())?)?;
        }
        ProbabilityTable::new(population.fitness())
    }

    fn check_offspring(
        &self,
        offspring: &[Chromosome],
        encoding: Encoding,
        nbases: usize,
        generation: usize,
    ) -> Result<()> {
        let (found_encoding, found_len) = check_uniform(offspring).map_err(|e| {
            GeneticError::Breeding(format!("generation {} produced invalid offspring: {}", generation, e))
        })?;
        if found_encoding != encoding || found_len != nbases {
            return Err(GeneticError::Breeding(format!(
                "generation {} produced {} offspring with {} genes, expected {} with {}",
                generation, found_encoding, found_len, encoding, nbases
            )));
        }
        Ok(())
    }

    fn report(&self, generation: usize, population: &Population, options: &EvolutionOptions) {
        match options.get_log_level() {
            LogLevel::Minimal => info!(generation, best = population.best().1, "generation"),
            LogLevel::Verbose => {
                info!(generation, best = population.best().1, "generation");
                for ((chromosome, y), f) in population
                    .chromosomes()
                    .iter()
                    .zip(population.objectives())
                    .zip(population.fitness())
                {
                    debug!(
                        generation,
                        x = %self.objective.display(chromosome),
                        y = *y,
                        fitness = *f,
                        "individual"
                    );
                }
            }
            LogLevel::None => {}
        }
    }
}

/// Runs a GA from plain closures.
///
/// The encoding of the operator set is taken from the first chromosome of
/// `initial`.
///
/// # Examples
///
/// ```
/// use simplega::chromosome::Chromosome;
/// use simplega::evolution::{run, EvolutionOptions};
/// use simplega::rng::{Pick, RandomNumberGenerator, RandomSource};
/// use simplega::strategy::{displacement_mutation, order_crossover};
///
/// let mut rng = RandomNumberGenerator::from_seed(1234);
/// let initial: Vec<Chromosome> = (0..10)
///     .map(|_| {
///         let mut tour: Vec<usize> = (0..6).collect();
///         rng.shuffle(&mut tour);
///         Chromosome::Permutation(tour)
///     })
///     .collect();
///
/// // number of positions out of order
/// let objective = |c: &Chromosome| {
///     c.as_permutation()
///         .map_or(0.0, |t| t.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64)
/// };
///
/// let result = run(
///     initial,
///     objective,
///     |c: &Chromosome| c.to_string(),
///     |a: &Chromosome, b: &Chromosome, rng: &mut dyn RandomSource| {
///         let (x, y) = order_crossover(a.permutation_genes()?, b.permutation_genes()?, 0.8, Pick::Random, rng)?;
///         Ok((Chromosome::Permutation(x), Chromosome::Permutation(y)))
///     },
///     |c: Chromosome, rng: &mut dyn RandomSource| {
///         displacement_mutation(c.into_permutation()?, 0.1, Pick::Random, Pick::Random, rng)
///             .map(Chromosome::Permutation)
///     },
///     &EvolutionOptions::default(),
///     &mut rng,
/// )
/// .unwrap();
///
/// assert_eq!(result.best_trace.len(), 11);
/// ```
pub fn run<F, D, C, M, R>(
    initial: Vec<Chromosome>,
    objective: F,
    display: D,
    crossover: C,
    mutation: M,
    options: &EvolutionOptions,
    rng: &mut R,
) -> Result<EvolutionResult>
where
    F: Fn(&Chromosome) -> f64 + Sync,
    D: Fn(&Chromosome) -> String + Sync,
    C: Fn(&Chromosome, &Chromosome, &mut dyn RandomSource) -> Result<(Chromosome, Chromosome)>,
    M: Fn(Chromosome, &mut dyn RandomSource) -> Result<Chromosome>,
    R: RandomSource,
{
    let encoding = initial
        .first()
        .map(Chromosome::encoding)
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

    let launcher = EvolutionLauncher::new(
        FnStrategy::new(encoding, crossover, mutation),
        FnObjective::new(objective).with_display(display),
    );
    launcher.evolve(options, initial, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::FitnessScaling;
    use crate::rng::RandomNumberGenerator;
    use crate::selection::SelectionMethod;
    use crate::strategy::{ContinuousStrategy, PermutationStrategy};

    fn sum_objective() -> FnObjective<impl Fn(&Chromosome) -> f64 + Clone> {
        FnObjective::new(|c: &Chromosome| c.as_continuous().map_or(0.0, |g| g.iter().sum()))
    }

    fn line_population(values: &[f64]) -> Vec<Chromosome> {
        values.iter().map(|&v| Chromosome::Continuous(vec![v])).collect()
    }

    fn shifting_strategy(
        shift_a: f64,
        shift_b: f64,
    ) -> FnStrategy<
        impl Fn(&Chromosome, &Chromosome, &mut dyn RandomSource) -> Result<(Chromosome, Chromosome)>,
        impl Fn(Chromosome, &mut dyn RandomSource) -> Result<Chromosome>,
    > {
        FnStrategy::new(
            Encoding::Continuous,
            move |a: &Chromosome, b: &Chromosome, _rng: &mut dyn RandomSource| {
                let x = a.continuous_genes()?.iter().map(|g| g + shift_a).collect();
                let y = b.continuous_genes()?.iter().map(|g| g + shift_b).collect();
                Ok((Chromosome::Continuous(x), Chromosome::Continuous(y)))
            },
            |c: Chromosome, _rng: &mut dyn RandomSource| Ok(c),
        )
    }

    #[test]
    fn test_elite_replaces_worst_when_everything_got_worse() {
        let launcher = EvolutionLauncher::new(shifting_strategy(10.0, 10.0), sum_objective());
        let options = EvolutionOptions::new(1, LogLevel::None);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = launcher
            .evolve(&options, line_population(&[0.0, 1.0, 2.0, 3.0]), &mut rng)
            .unwrap();

        assert_eq!(result.best_trace, vec![0.0, 0.0]);
        assert_eq!(result.chromosomes[0], Chromosome::Continuous(vec![0.0]));
        assert_eq!(result.chromosomes.len(), 4);
    }

    #[test]
    fn test_elite_not_inserted_when_new_best_is_better() {
        // half the children improve, half get worse: the elite beats the new
        // worst but not the new best, so it is not carried over
        let launcher = EvolutionLauncher::new(shifting_strategy(-10.0, 10.0), sum_objective());
        let options = EvolutionOptions::new(1, LogLevel::None);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = launcher
            .evolve(&options, line_population(&[0.0, 1.0, 2.0, 3.0]), &mut rng)
            .unwrap();

        assert!(!result.chromosomes.contains(&Chromosome::Continuous(vec![0.0])));
        assert!(result.best_trace[1] <= -7.0);
    }

    #[test]
    fn test_without_elitism_best_can_be_lost() {
        let launcher = EvolutionLauncher::new(shifting_strategy(10.0, 10.0), sum_objective());
        let options = EvolutionOptions::builder()
            .num_generations(1)
            .elitism(false)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = launcher
            .evolve(&options, line_population(&[0.0, 1.0, 2.0, 3.0]), &mut rng)
            .unwrap();

        assert!(result.best_trace[1] >= 10.0);
    }

    #[test]
    fn test_trace_length_and_sorted_result() {
        let launcher = EvolutionLauncher::new(ContinuousStrategy::new(0.8, 0.1).unwrap(), sum_objective());
        let options = EvolutionOptions::new(7, LogLevel::None);
        let mut rng = RandomNumberGenerator::from_seed(12);
        let initial: Vec<Chromosome> = (0..6)
            .map(|i| Chromosome::Continuous(vec![i as f64, 1.0, 0.5]))
            .collect();

        let result = launcher.evolve(&options, initial, &mut rng).unwrap();

        assert_eq!(launcher.strategy().encoding(), Encoding::Continuous);
        assert_eq!(launcher.strategy().mutation_probability(), 0.1);
        assert_eq!(result.best_trace.len(), 8);
        assert_eq!(result.chromosomes.len(), 6);
        assert!(result.objectives.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.best().unwrap().1, *result.best_trace.last().unwrap());
        assert!(result.best_trace.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_zero_generations_returns_sorted_initial() {
        let launcher = EvolutionLauncher::new(ContinuousStrategy::default(), sum_objective());
        let options = EvolutionOptions::new(0, LogLevel::None);
        let mut rng = RandomNumberGenerator::from_seed(12);

        let result = launcher
            .evolve(&options, line_population(&[3.0, 1.0, 2.0, 0.5]), &mut rng)
            .unwrap();

        assert_eq!(result.objectives, vec![0.5, 1.0, 2.0, 3.0]);
        assert_eq!(result.best_trace, vec![0.5]);
    }

    #[test]
    fn test_contract_violations_fail_fast() {
        let launcher = EvolutionLauncher::new(ContinuousStrategy::default(), sum_objective());
        let options = EvolutionOptions::default();
        let mut rng = RandomNumberGenerator::from_seed(12);

        assert_eq!(
            launcher.evolve(&options, Vec::new(), &mut rng),
            Err(GeneticError::EmptyPopulation)
        );
        assert_eq!(
            launcher.evolve(&options, line_population(&[1.0, 2.0, 3.0]), &mut rng),
            Err(GeneticError::OddPopulation(3))
        );

        let ragged = vec![
            Chromosome::Continuous(vec![1.0, 2.0]),
            Chromosome::Continuous(vec![1.0]),
        ];
        assert!(matches!(
            launcher.evolve(&options, ragged, &mut rng),
            Err(GeneticError::ChromosomeLength { .. })
        ));

        let tours = vec![
            Chromosome::Permutation(vec![0, 1]),
            Chromosome::Permutation(vec![1, 0]),
        ];
        assert!(matches!(
            launcher.evolve(&options, tours, &mut rng),
            Err(GeneticError::EncodingMismatch(_))
        ));
    }

    #[test]
    fn test_non_finite_objective_is_reported() {
        let objective = FnObjective::new(|c: &Chromosome| {
            let g = c.as_continuous().map_or(0.0, |g| g[0]);
            if g > 1.5 {
                f64::NAN
            } else {
                g
            }
        });
        let launcher = EvolutionLauncher::new(ContinuousStrategy::default(), objective);
        let mut rng = RandomNumberGenerator::from_seed(12);

        let result = launcher.evolve(
            &EvolutionOptions::default(),
            line_population(&[1.0, 2.0]),
            &mut rng,
        );
        assert!(matches!(result, Err(GeneticError::FitnessCalculation(_))));
    }

    #[test]
    fn test_malformed_offspring_are_rejected() {
        let strategy = FnStrategy::new(
            Encoding::Continuous,
            |a: &Chromosome, b: &Chromosome, _rng: &mut dyn RandomSource| Ok((a.clone(), b.clone())),
            |_c: Chromosome, _rng: &mut dyn RandomSource| Ok(Chromosome::Continuous(vec![1.0, 2.0])),
        );
        let launcher = EvolutionLauncher::new(strategy, sum_objective());
        let mut rng = RandomNumberGenerator::from_seed(12);

        let result = launcher.evolve(
            &EvolutionOptions::default(),
            line_population(&[1.0, 2.0]),
            &mut rng,
        );
        assert!(matches!(result, Err(GeneticError::Breeding(_))));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cities: Vec<(f64, f64)> = (0..8)
            .map(|i| ((i * 37 % 11) as f64, (i * 53 % 7) as f64))
            .collect();
        let objective = FnObjective::new(move |c: &Chromosome| {
            let tour = c.as_permutation().unwrap_or(&[]);
            (0..tour.len())
                .map(|i| {
                    let (ax, ay) = cities[tour[i]];
                    let (bx, by) = cities[tour[(i + 1) % tour.len()]];
                    ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt()
                })
                .sum()
        });
        let launcher = EvolutionLauncher::new(PermutationStrategy::new(0.8, 0.2).unwrap(), objective);
        let options = EvolutionOptions::builder()
            .num_generations(15)
            .selection(SelectionMethod::StochasticUniversal)
            .fitness_scaling(FitnessScaling::Ranking)
            .ranking_pressure(1.5)
            .build();

        let run_once = |seed: u64, threshold: usize| {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let initial = crate::chromosome::random_permutation_population(12, 8, &mut rng);
            let mut options = options.clone();
            options.set_parallel_threshold(threshold);
            launcher.evolve(&options, initial, &mut rng).unwrap()
        };

        let a = run_once(77, 1000);
        let b = run_once(77, 1000);
        let parallel = run_once(77, 1);

        assert_eq!(a, b);
        assert_eq!(a, parallel);
        assert!(a.best_trace.windows(2).all(|w| w[1] <= w[0]));
    }
}
