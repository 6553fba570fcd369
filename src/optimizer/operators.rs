use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};
use crate::models::{Diet, Meal, Menu};
use crate::optimizer::constants::{CROSSOVER_SLOT_BIAS, MEAL_MUTATION_RATE, SLOT_MUTATION_RATE};

/// Mutation probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationRates {
    /// Chance that a meal is picked for mutation.
    pub meal_rate: f64,
    /// Chance that each slot of a picked meal is replaced.
    pub slot_rate: f64,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            meal_rate: MEAL_MUTATION_RATE,
            slot_rate: SLOT_MUTATION_RATE,
        }
    }
}

impl MutationRates {
    /// Rates checked to be probabilities.
    pub fn new(meal_rate: f64, slot_rate: f64) -> Result<Self> {
        let rates = Self {
            meal_rate,
            slot_rate,
        };
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("mutation.meal_rate", self.meal_rate)?;
        check_probability("mutation.slot_rate", self.slot_rate)
    }
}

/// Fails unless `p` lies in [0, 1]. NaN fails.
pub(crate) fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DietError::InvalidConfig(format!(
            "{name} must be within [0, 1] (got {p})"
        )))
    }
}

/// Slot-wise uniform crossover.
///
/// The child follows `parent1`'s meal labels; each slot takes either
/// parent's menu with equal chance. Meals and slots are paired by
/// position, so plans of different shape are cut to the shorter one.
pub fn crossover<R: Rng + ?Sized>(parent1: &Diet, parent2: &Diet, rng: &mut R) -> Diet {
    let meals = parent1
        .meals
        .iter()
        .zip(&parent2.meals)
        .map(|(meal1, meal2)| {
            let menus = meal1
                .menus
                .iter()
                .zip(&meal2.menus)
                .map(|(menu1, menu2)| {
                    if rng.gen_bool(CROSSOVER_SLOT_BIAS) {
                        Arc::clone(menu1)
                    } else {
                        Arc::clone(menu2)
                    }
                })
                .collect();
            Meal::new(menus, meal1.day.clone(), meal1.meal_type)
        })
        .collect();

    Diet::new(meals)
}

/// Random slot substitution from the full catalogue.
///
/// Any catalogue menu may land in any slot; categories are not checked.
/// Untouched meals and slots keep their menus. An empty
/// catalogue leaves the plan unchanged.
///
/// # Panics
///
/// Panics if either rate lies outside [0, 1]. Build rates with
/// [`MutationRates::new`] to check them up front.
pub fn mutate<R: Rng + ?Sized>(
    diet: &Diet,
    catalogue: &[Arc<Menu>],
    rates: &MutationRates,
    rng: &mut R,
) -> Diet {
    let meals = diet
        .meals
        .iter()
        .map(|meal| {
            if !rng.gen_bool(rates.meal_rate) {
                return meal.clone();
            }
            let menus = meal
                .menus
                .iter()
                .map(|menu| {
                    if rng.gen_bool(rates.slot_rate) {
                        catalogue.choose(&mut *rng).unwrap_or(menu).clone()
                    } else {
                        Arc::clone(menu)
                    }
                })
                .collect();
            Meal::new(menus, meal.day.clone(), meal.meal_type)
        })
        .collect();

    Diet::new(meals)
}
