pub mod config;
pub mod constants;
pub mod fitness;
pub mod harmony;
pub mod operators;
pub mod pareto;
pub mod search;
pub mod selection;

pub use config::{OptimizerConfig, TerminationRule};
pub use constants::*;
pub use fitness::{
    CostBounds, Fitness, FitnessEvaluator, evaluate_cost, evaluate_cost_with_bounds,
    evaluate_diversity, evaluate_harmony, evaluate_nutrition,
};
pub use harmony::HarmonyMatrix;
pub use operators::{MutationRates, crossover, mutate};
pub use pareto::{crowding_distance, dominates, non_dominated_sort, pareto_front};
pub use search::{DietOptimizer, OptimizationResult, ScoredDiet, Termination};
pub use selection::{select, select_indices};
