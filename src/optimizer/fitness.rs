use std::collections::BTreeMap;

use crate::models::{Diet, Nutrient, NutrientConstraints, NutrientProfile};
use crate::optimizer::constants::{COST_WINDOW_MEALS, OBJECTIVE_COUNT, SCORE_SCALE};
use crate::optimizer::harmony::HarmonyMatrix;

/// Objective scores of one plan. Higher is better on every objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitness {
    scores: [f64; OBJECTIVE_COUNT],
}

impl Fitness {
    pub fn new(nutrition: f64, cost: f64, harmony: f64, diversity: f64) -> Self {
        Self {
            scores: [nutrition, cost, harmony, diversity],
        }
    }

    pub fn nutrition(&self) -> f64 {
        self.scores[0]
    }

    pub fn cost(&self) -> f64 {
        self.scores[1]
    }

    pub fn harmony(&self) -> f64 {
        self.scores[2]
    }

    pub fn diversity(&self) -> f64 {
        self.scores[3]
    }

    pub fn values(&self) -> [f64; OBJECTIVE_COUNT] {
        self.scores
    }

    /// Number of objectives on which `self` is strictly greater than `baseline`.
    pub fn improvements_over(&self, baseline: &Fitness) -> usize {
        self.scores
            .iter()
            .zip(&baseline.scores)
            .filter(|(current, initial)| current > initial)
            .count()
    }
}

impl AsRef<[f64]> for Fitness {
    fn as_ref(&self) -> &[f64] {
        &self.scores
    }
}

/// Penalty of -1 per meal and per nutrient whose meal total falls
/// outside the accepted window.
///
/// Range: -(5 × meal count) to 0.
pub fn evaluate_nutrition(diet: &Diet, constraints: &NutrientConstraints) -> f64 {
    let mut total_penalty = 0.0;

    for meal in &diet.meals {
        let mut totals = NutrientProfile::default();
        for menu in &meal.menus {
            totals.add(&menu.nutrients);
        }

        let misses = Nutrient::ALL
            .iter()
            .filter(|&&n| !constraints.accepts(n, totals.get(n)))
            .count();
        total_penalty -= misses as f64;
    }

    total_penalty
}

/// Cheapest and dearest plan cost seen in the historical database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBounds {
    pub min_cost: f64,
    pub max_cost: f64,
}

impl CostBounds {
    /// Sum of the `COST_WINDOW_MEALS` cheapest and the `COST_WINDOW_MEALS`
    /// most expensive historical meals.
    pub fn from_history(history: &Diet) -> Self {
        let mut costs: Vec<f64> = history.meals.iter().map(|m| m.cost()).collect();
        costs.sort_by(f64::total_cmp);

        let window = COST_WINDOW_MEALS.min(costs.len());
        let min_cost = costs[..window].iter().sum();
        let max_cost = costs[costs.len() - window..].iter().sum();

        Self { min_cost, max_cost }
    }

    /// Spread between the bounds, `None` when there is none.
    fn spread(&self) -> Option<f64> {
        let spread = self.max_cost - self.min_cost;
        (spread.is_finite() && spread != 0.0).then_some(spread)
    }
}

/// Cost of `diet` relative to the historical bounds, negated so cheaper
/// is better.
///
/// Range: -100 (as dear as the dearest window) to 0 (as cheap as the
/// cheapest window). Zero spread scores 0.
pub fn evaluate_cost_with_bounds(diet: &Diet, bounds: &CostBounds) -> f64 {
    match bounds.spread() {
        Some(spread) => -(diet.total_cost() - bounds.min_cost) / spread * SCORE_SCALE,
        None => 0.0,
    }
}

/// Cost score against a historical database.
///
/// Recomputes the bounds on every call; prefer [`FitnessEvaluator`] in loops.
pub fn evaluate_cost(history: &Diet, diet: &Diet) -> f64 {
    evaluate_cost_with_bounds(diet, &CostBounds::from_history(history))
}

/// Mean normalized historical co-occurrence over every pair of menu
/// mentions in the plan.
///
/// Pairs are pooled across the whole plan, not per meal. Menus missing
/// from the matrix contribute no term. Range: 0 to 100; a matrix with no
/// spread scores 0.
pub fn evaluate_harmony(harmony: &HarmonyMatrix, diet: &Diet) -> f64 {
    let min = f64::from(harmony.min());
    let spread = f64::from(harmony.max()) - min;
    if spread == 0.0 {
        return 0.0;
    }

    let ids: Vec<Option<usize>> = diet.all_menus().map(|m| harmony.index_of(&m.name)).collect();

    let mut score = 0.0;
    let mut terms = 0usize;
    for (pos, a) in ids.iter().enumerate() {
        let Some(a) = *a else { continue };
        for &b in ids[pos + 1..].iter().flatten() {
            score += (f64::from(harmony.cell(a, b)) - min) / spread;
            terms += 1;
        }
    }

    if terms > 0 {
        score / terms as f64 * SCORE_SCALE
    } else {
        0.0
    }
}

/// How evenly repeated menus are spread over the plan.
///
/// For each menu served more than once, the gaps between consecutive
/// meal indices give `100 × (-var / (n²/4) + (min_gap - 1) / (n - 1))`;
/// the result is the mean over repeated menus, 0 when nothing repeats.
pub fn evaluate_diversity(diet: &Diet) -> f64 {
    let n_meals = diet.meals.len();
    if n_meals < 2 {
        return 0.0;
    }

    let mut occurrences: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, meal) in diet.meals.iter().enumerate() {
        for name in meal.menu_names() {
            occurrences.entry(name).or_default().push(i);
        }
    }

    let n = n_meals as f64;
    let scores: Vec<f64> = occurrences
        .values()
        .filter(|positions| positions.len() > 1)
        .map(|positions| {
            let gaps: Vec<f64> = positions.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
            let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
            let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
            let min_gap = gaps.iter().copied().fold(f64::INFINITY, f64::min);

            let normalized_variance = variance / (n * n / 4.0);
            let normalized_min_gap = (min_gap - 1.0) / (n - 1.0);
            SCORE_SCALE * (-normalized_variance + normalized_min_gap)
        })
        .collect();

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Scores plans against fixed reference data.
///
/// Cost bounds and the harmony matrix are derived once at construction.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    constraints: NutrientConstraints,
    cost_bounds: CostBounds,
    harmony: HarmonyMatrix,
}

impl FitnessEvaluator {
    pub fn new(constraints: NutrientConstraints, history: &Diet) -> Self {
        Self {
            constraints,
            cost_bounds: CostBounds::from_history(history),
            harmony: HarmonyMatrix::from_history(history),
        }
    }

    pub fn cost_bounds(&self) -> &CostBounds {
        &self.cost_bounds
    }

    pub fn harmony(&self) -> &HarmonyMatrix {
        &self.harmony
    }

    /// All four objective scores of `diet`.
    pub fn evaluate(&self, diet: &Diet) -> Fitness {
        Fitness::new(
            evaluate_nutrition(diet, &self.constraints),
            evaluate_cost_with_bounds(diet, &self.cost_bounds),
            evaluate_harmony(&self.harmony, diet),
            evaluate_diversity(diet),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Meal, MealType, Menu};
    use std::sync::Arc;

    fn menu(name: &str, price: f64) -> Arc<Menu> {
        Arc::new(Menu::new(
            name,
            NutrientProfile::default(),
            vec![Ingredient::new("x", price, 100.0)],
            "Side",
        ))
    }

    fn single_slot_plan(menus: &[&Arc<Menu>]) -> Diet {
        Diet::new(
            menus
                .iter()
                .enumerate()
                .map(|(i, m)| Meal::new(vec![Arc::clone(m)], i.to_string(), MealType::Lunch))
                .collect(),
        )
    }

    #[test]
    fn test_improvements_over() {
        let seed = Fitness::new(-10.0, -50.0, 10.0, 5.0);
        let better = Fitness::new(-9.0, -40.0, 10.0, 6.0);
        assert_eq!(better.improvements_over(&seed), 3);
        assert_eq!(seed.improvements_over(&seed), 0);
    }

    #[test]
    fn test_cost_bounds_use_window() {
        let cheap = menu("Cheap", 1.0);
        let dear = menu("Dear", 3.0);
        let history = single_slot_plan(&[&cheap, &dear, &dear]);
        let bounds = CostBounds::from_history(&history);
        // Fewer than 21 meals: both windows cover the whole history.
        assert_eq!(bounds.min_cost, 7.0);
        assert_eq!(bounds.max_cost, 7.0);
    }

    #[test]
    fn test_cost_scales_between_bounds() {
        let bounds = CostBounds {
            min_cost: 10.0,
            max_cost: 30.0,
        };
        let m = menu("M", 20.0);
        let diet = single_slot_plan(&[&m]);
        assert!((evaluate_cost_with_bounds(&diet, &bounds) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_diversity_even_spacing() {
        let a = menu("A", 1.0);
        let b = menu("B", 1.0);
        // A at 0 and 2: gap 2, variance 0, (2 - 1) / (4 - 1).
        let diet = single_slot_plan(&[&a, &b, &a, &b]);
        let expected = 100.0 * (1.0 / 3.0);
        assert!((evaluate_diversity(&diet) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_diversity_uneven_spacing_penalized() {
        let a = menu("A", 1.0);
        let b = menu("B", 1.0);
        // A at 0, 1, 4: gaps 1 and 3, variance 1, min gap 1.
        let diet = single_slot_plan(&[&a, &a, &b, &b, &a]);
        let a_score = 100.0 * (-1.0 / (25.0 / 4.0));
        // B at 2, 3: gap 1, variance 0, min gap 1.
        let b_score = 0.0;
        let expected = (a_score + b_score) / 2.0;
        assert!((evaluate_diversity(&diet) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_diversity_single_meal_is_zero() {
        let a = menu("A", 1.0);
        let diet = Diet::new(vec![Meal::new(
            vec![a.clone(), a],
            "1",
            MealType::Breakfast,
        )]);
        assert_eq!(evaluate_diversity(&diet), 0.0);
    }

    #[test]
    fn test_harmony_skips_unknown_menus() {
        let a = menu("A", 1.0);
        let b = menu("B", 1.0);
        let c = menu("C", 1.0);
        let history = Diet::new(vec![
            Meal::new(vec![a.clone(), b.clone()], "1", MealType::Lunch),
            Meal::new(vec![a.clone()], "2", MealType::Lunch),
        ]);
        let matrix = HarmonyMatrix::from_history(&history);
        // Cells: AA=2, AB=1, BB=1; min 1, max 2.
        let with_unknown = single_slot_plan(&[&a, &b, &c]);
        let without = single_slot_plan(&[&a, &b]);
        assert_eq!(
            evaluate_harmony(&matrix, &with_unknown),
            evaluate_harmony(&matrix, &without)
        );
        assert_eq!(evaluate_harmony(&matrix, &without), 0.0);

        let repeated = single_slot_plan(&[&a, &a]);
        assert!((evaluate_harmony(&matrix, &repeated) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluator_never_nan() {
        let a = menu("A", 5.0);
        let history = single_slot_plan(&[&a, &a]);
        let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
        let fitness = evaluator.evaluate(&history);
        assert!(fitness.values().iter().all(|v| !v.is_nan()));
    }
}
