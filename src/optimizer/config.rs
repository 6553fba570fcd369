use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};
use crate::optimizer::constants::{
    CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_POPULATION_SIZE, MIN_IMPROVED_OBJECTIVES,
    OBJECTIVE_COUNT, REQUIRED_IMPROVED_DIETS,
};
use crate::optimizer::fitness::Fitness;
use crate::optimizer::operators::{MutationRates, check_probability};

/// When a front counts as good enough to stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminationRule {
    /// Objectives a plan must strictly beat the seed on.
    pub min_improved_objectives: usize,
    /// Improved front members needed to stop early.
    pub required_improved: usize,
}

impl Default for TerminationRule {
    fn default() -> Self {
        Self {
            min_improved_objectives: MIN_IMPROVED_OBJECTIVES,
            required_improved: REQUIRED_IMPROVED_DIETS,
        }
    }
}

impl TerminationRule {
    /// Whether `fitness` beats `baseline` on enough objectives.
    pub fn counts_as_improved(&self, fitness: &Fitness, baseline: &Fitness) -> bool {
        fitness.improvements_over(baseline) >= self.min_improved_objectives
    }

    /// Whether `improved` front members are enough to stop.
    pub fn is_met(&self, improved: usize) -> bool {
        improved >= self.required_improved
    }
}

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Generation ceiling. Zero scores the initial population only.
    pub generations: usize,
    pub population_size: usize,
    /// Chance an offspring is bred by crossover instead of mutation.
    pub crossover_rate: f64,
    pub mutation: MutationRates,
    pub termination: TerminationRule,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            crossover_rate: CROSSOVER_RATE,
            mutation: MutationRates::default(),
            termination: TerminationRule::default(),
        }
    }
}

impl OptimizerConfig {
    /// Load settings from a JSON file; missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: OptimizerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(DietError::InvalidConfig(format!(
                "population_size must be at least 2 (got {})",
                self.population_size
            )));
        }

        check_probability("crossover_rate", self.crossover_rate)?;
        self.mutation.validate()?;

        if self.termination.min_improved_objectives > OBJECTIVE_COUNT {
            return Err(DietError::InvalidConfig(format!(
                "termination.min_improved_objectives cannot exceed {OBJECTIVE_COUNT} (got {})",
                self.termination.min_improved_objectives
            )));
        }

        Ok(())
    }
}
