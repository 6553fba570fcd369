use crate::models::NutrientProfile;

/// Number of objectives scored per plan.
pub const OBJECTIVE_COUNT: usize = 4;

/// Objective labels in fitness-vector order.
pub const OBJECTIVE_NAMES: [&str; OBJECTIVE_COUNT] = ["nutrition", "cost", "harmony", "diversity"];

// ─────────────────────────────────────────────────────────────────────────────
// Search defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default generation ceiling.
pub const DEFAULT_GENERATIONS: usize = 100;

/// Default population size.
pub const DEFAULT_POPULATION_SIZE: usize = 50;

/// Probability that an offspring comes from crossover rather than mutation.
pub const CROSSOVER_RATE: f64 = 0.7;

/// Probability that crossover takes a slot from the first parent.
pub const CROSSOVER_SLOT_BIAS: f64 = 0.5;

/// Probability that a meal is picked for mutation.
pub const MEAL_MUTATION_RATE: f64 = 0.1;

/// Probability that a slot of a picked meal is replaced.
pub const SLOT_MUTATION_RATE: f64 = 0.5;

/// Objectives a plan must beat the seed on to count as improved.
pub const MIN_IMPROVED_OBJECTIVES: usize = 3;

/// Improved front members needed to stop early.
pub const REQUIRED_IMPROVED_DIETS: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Meals summed at each end of the historical cost distribution.
pub const COST_WINDOW_MEALS: usize = 21;

/// Scale applied to cost, harmony and diversity scores.
pub const SCORE_SCALE: f64 = 100.0;

/// Reference per-meal nutrient minimums.
pub const REFERENCE_MIN: NutrientProfile = NutrientProfile {
    energy: 1500.0,
    carbohydrate: 230.0,
    protein: 55.0,
    fat: 50.0,
    calcium: 700.0,
};

/// Reference per-meal nutrient maximums.
pub const REFERENCE_MAX: NutrientProfile = NutrientProfile {
    energy: 2200.0,
    carbohydrate: 300.0,
    protein: 100.0,
    fat: 80.0,
    calcium: 2500.0,
};

/// Reference nutrient weights.
pub const REFERENCE_WEIGHTS: NutrientProfile = NutrientProfile {
    energy: 1.0,
    carbohydrate: 0.8,
    protein: 1.2,
    fat: 0.9,
    calcium: 0.7,
};

// ─────────────────────────────────────────────────────────────────────────────
// Reporting
// ─────────────────────────────────────────────────────────────────────────────

/// Improved plans suggested after a run.
pub const MAX_SUGGESTIONS: usize = 5;

/// Historical menus listed by the harmony report.
pub const TOP_MENU_COUNT: usize = 5;
