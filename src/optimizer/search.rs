use std::fmt;
use std::sync::Arc;

use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::{debug, info};

use crate::error::{DietError, Result};
use crate::models::{Diet, Menu};
use crate::optimizer::config::OptimizerConfig;
use crate::optimizer::fitness::{Fitness, FitnessEvaluator};
use crate::optimizer::operators::{crossover, mutate};
use crate::optimizer::pareto::pareto_front;
use crate::optimizer::selection::select;

/// A plan paired with its objective scores.
#[derive(Debug, Clone)]
pub struct ScoredDiet {
    pub diet: Diet,
    pub fitness: Fitness,
}

impl AsRef<[f64]> for ScoredDiet {
    fn as_ref(&self) -> &[f64] {
        self.fitness.as_ref()
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Enough front members beat the seed plan.
    EarlySuccess { generation: usize, improved: usize },
    /// The generation ceiling was reached.
    GenerationLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::EarlySuccess {
                generation,
                improved,
            } => write!(
                f,
                "termination condition met at generation {generation}: {improved} improved diets found"
            ),
            Termination::GenerationLimit => f.write_str("maximum generations reached"),
        }
    }
}

/// Outcome of one optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Non-dominated plans of the last scored population.
    pub front: Vec<ScoredDiet>,
    pub termination: Termination,
    /// Generations scored before stopping.
    pub generations: usize,
    /// Scores of the seed plan, the improvement baseline.
    pub seed_fitness: Fitness,
}

/// Multi-objective evolutionary search over weekly plans.
#[derive(Debug, Clone)]
pub struct DietOptimizer {
    catalogue: Vec<Arc<Menu>>,
    evaluator: FitnessEvaluator,
    config: OptimizerConfig,
}

impl DietOptimizer {
    /// Fails on an invalid config or an empty catalogue, before any search.
    pub fn new(
        catalogue: Vec<Arc<Menu>>,
        evaluator: FitnessEvaluator,
        config: OptimizerConfig,
    ) -> Result<Self> {
        config.validate()?;
        if catalogue.is_empty() {
            return Err(DietError::EmptyCatalogue);
        }
        Ok(Self {
            catalogue,
            evaluator,
            config,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &[Arc<Menu>] {
        &self.catalogue
    }

    pub fn fitness(&self, diet: &Diet) -> Fitness {
        self.evaluator.evaluate(diet)
    }

    fn score(&self, diet: Diet) -> ScoredDiet {
        let fitness = self.fitness(&diet);
        ScoredDiet { diet, fitness }
    }

    /// Front members beating `baseline` on enough objectives.
    pub fn count_improved(&self, baseline: &Fitness, front: &[ScoredDiet]) -> usize {
        front
            .iter()
            .filter(|s| self.config.termination.counts_as_improved(&s.fitness, baseline))
            .count()
    }

    /// The seed followed by mutated clones of it.
    fn initial_population<R: Rng + ?Sized>(&self, seed: &Diet, rng: &mut R) -> Vec<ScoredDiet> {
        let mut population = Vec::with_capacity(self.config.population_size);
        population.push(self.score(seed.clone()));
        while population.len() < self.config.population_size {
            let clone = mutate(seed, &self.catalogue, &self.config.mutation, rng);
            population.push(self.score(clone));
        }
        population
    }

    /// Offspring that fill the population back up after selection.
    fn breed<R: Rng + ?Sized>(&self, parents: &[ScoredDiet], rng: &mut R) -> Vec<ScoredDiet> {
        let target = self.config.population_size.saturating_sub(parents.len());
        let mut offspring = Vec::with_capacity(target);

        while offspring.len() < target {
            let child = if parents.len() >= 2 && rng.gen_bool(self.config.crossover_rate) {
                let pair = index::sample(rng, parents.len(), 2);
                crossover(&parents[pair.index(0)].diet, &parents[pair.index(1)].diet, rng)
            } else {
                let Some(parent) = parents.choose(rng) else {
                    break;
                };
                mutate(&parent.diet, &self.catalogue, &self.config.mutation, rng)
            };
            offspring.push(self.score(child));
        }

        offspring
    }

    fn front_of(population: &[ScoredDiet]) -> Vec<ScoredDiet> {
        pareto_front(population)
            .into_iter()
            .map(|i| population[i].clone())
            .collect()
    }

    /// Evolve plans starting from `seed` and return the final Pareto front.
    ///
    /// Each generation scores the population, stops early once enough
    /// front members beat the seed, and otherwise keeps the selected
    /// parents and refills the rest with offspring. With zero generations
    /// the initial population's front is returned.
    pub fn optimize<R: Rng + ?Sized>(&self, seed: &Diet, rng: &mut R) -> OptimizationResult {
        let seed_fitness = self.fitness(seed);
        let mut population = self.initial_population(seed, rng);
        let mut front = Self::front_of(&population);
        let mut generations = 0;

        for generation in 0..self.config.generations {
            if generation > 0 {
                front = Self::front_of(&population);
            }
            generations = generation + 1;

            let improved = self.count_improved(&seed_fitness, &front);
            debug!(generation, front_size = front.len(), improved, "generation scored");

            if self.config.termination.is_met(improved) {
                let termination = Termination::EarlySuccess {
                    generation,
                    improved,
                };
                info!(%termination, front_size = front.len(), "optimization finished");
                return OptimizationResult {
                    front,
                    termination,
                    generations,
                    seed_fitness,
                };
            }

            let parents = select(&population, &population);
            let offspring = self.breed(&parents, rng);

            population = parents;
            population.extend(offspring);
        }

        let termination = Termination::GenerationLimit;
        info!(%termination, front_size = front.len(), "optimization finished");
        OptimizationResult {
            front,
            termination,
            generations,
            seed_fitness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Meal, MealType, NutrientConstraints, NutrientProfile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn menu(name: &str, price: f64, energy: f64) -> Arc<Menu> {
        Arc::new(Menu::new(
            name,
            NutrientProfile::new(energy, 0.0, 0.0, 0.0, 0.0),
            vec![Ingredient::new(name, price, 100.0)],
            "Main",
        ))
    }

    fn fixture() -> (Vec<Arc<Menu>>, Diet) {
        let catalogue = vec![menu("A", 1.0, 100.0), menu("B", 2.0, 200.0), menu("C", 4.0, 300.0)];
        let history = Diet::new(
            (0..6)
                .map(|i| {
                    Meal::new(
                        vec![catalogue[i % 3].clone(), catalogue[(i + 1) % 3].clone()],
                        (i / 3 + 1).to_string(),
                        MealType::ALL[i % 3],
                    )
                })
                .collect(),
        );
        (catalogue, history)
    }

    fn optimizer(config: OptimizerConfig) -> (DietOptimizer, Diet) {
        let (catalogue, history) = fixture();
        let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
        (DietOptimizer::new(catalogue, evaluator, config).unwrap(), history)
    }

    #[test]
    fn test_new_rejects_empty_catalogue() {
        let (_, history) = fixture();
        let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
        let err = DietOptimizer::new(vec![], evaluator, OptimizerConfig::default());
        assert!(matches!(err, Err(DietError::EmptyCatalogue)));
    }

    #[test]
    fn test_zero_generations_returns_initial_front() {
        let config = OptimizerConfig {
            generations: 0,
            population_size: 6,
            ..Default::default()
        };
        let (opt, history) = optimizer(config);
        let mut rng = StdRng::seed_from_u64(11);
        let result = opt.optimize(&history, &mut rng);

        assert_eq!(result.termination, Termination::GenerationLimit);
        assert_eq!(result.generations, 0);
        assert!(!result.front.is_empty());
    }

    #[test]
    fn test_breed_fills_population() {
        let config = OptimizerConfig {
            population_size: 9,
            ..Default::default()
        };
        let (opt, history) = optimizer(config);
        let mut rng = StdRng::seed_from_u64(5);
        let parents = opt.initial_population(&history, &mut rng)[..4].to_vec();
        let offspring = opt.breed(&parents, &mut rng);
        assert_eq!(offspring.len(), 5);
        assert!(offspring.iter().all(|o| o.diet.same_shape(&history)));
    }

    #[test]
    fn test_single_parent_only_mutates() {
        let config = OptimizerConfig {
            population_size: 3,
            crossover_rate: 1.0,
            ..Default::default()
        };
        let (opt, history) = optimizer(config);
        let mut rng = StdRng::seed_from_u64(5);
        let parents = vec![opt.score(history.clone())];
        assert_eq!(opt.breed(&parents, &mut rng).len(), 2);
    }

    #[test]
    fn test_unreachable_rule_runs_to_limit() {
        let mut config = OptimizerConfig {
            generations: 4,
            population_size: 8,
            ..Default::default()
        };
        config.termination.required_improved = usize::MAX;
        let (opt, history) = optimizer(config);
        let mut rng = StdRng::seed_from_u64(2);
        let result = opt.optimize(&history, &mut rng);

        assert_eq!(result.termination, Termination::GenerationLimit);
        assert_eq!(result.generations, 4);
    }

    #[test]
    fn test_trivial_rule_stops_at_first_generation() {
        let mut config = OptimizerConfig {
            generations: 50,
            population_size: 8,
            ..Default::default()
        };
        config.termination.min_improved_objectives = 0;
        config.termination.required_improved = 1;
        let (opt, history) = optimizer(config);
        let mut rng = StdRng::seed_from_u64(2);
        let result = opt.optimize(&history, &mut rng);

        assert!(matches!(
            result.termination,
            Termination::EarlySuccess { generation: 0, .. }
        ));
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_same_seed_same_front() {
        let config = OptimizerConfig {
            generations: 5,
            population_size: 10,
            ..Default::default()
        };
        let (opt, history) = optimizer(config);
        let a = opt.optimize(&history, &mut StdRng::seed_from_u64(42));
        let b = opt.optimize(&history, &mut StdRng::seed_from_u64(42));

        assert_eq!(a.front.len(), b.front.len());
        for (x, y) in a.front.iter().zip(&b.front) {
            assert!(x.diet.same_menus(&y.diet));
            assert_eq!(x.fitness, y.fitness);
        }
    }

    fn scored(fitness: Fitness) -> ScoredDiet {
        ScoredDiet {
            diet: Diet::default(),
            fitness,
        }
    }

    #[test]
    fn test_default_rule_needs_five_plans_better_on_three_objectives() {
        let (opt, _) = optimizer(OptimizerConfig::default());
        let rule = opt.config().termination;
        let seed = Fitness::new(-3.0, -50.0, 20.0, 10.0);
        let three_of_four = Fitness::new(-2.0, -40.0, 25.0, 10.0);
        let two_of_four = Fitness::new(-2.0, -40.0, 20.0, 5.0);

        let mut front = vec![scored(two_of_four); 3];
        front.extend(vec![scored(three_of_four); 4]);
        let improved = opt.count_improved(&seed, &front);
        assert_eq!(improved, 4);
        assert!(!rule.is_met(improved));

        front.push(scored(three_of_four));
        let improved = opt.count_improved(&seed, &front);
        assert_eq!(improved, 5);
        assert!(rule.is_met(improved));

        // Ties with the seed do not count as improvement.
        assert!(!rule.counts_as_improved(&seed, &seed));
        assert!(!rule.counts_as_improved(&two_of_four, &seed));
        assert!(rule.counts_as_improved(&three_of_four, &seed));
    }
}
