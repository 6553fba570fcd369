use serde::{Deserialize, Serialize};

use crate::models::{Nutrient, NutrientProfile};
use crate::optimizer::constants::{REFERENCE_MAX, REFERENCE_MIN, REFERENCE_WEIGHTS};

/// Acceptable per-meal nutrient totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientConstraints {
    pub min_values: NutrientProfile,
    pub max_values: NutrientProfile,

    /// Carried with the constraints; the nutrition score does not read it.
    #[serde(default)]
    pub weights: NutrientProfile,
}

impl Default for NutrientConstraints {
    fn default() -> Self {
        Self {
            min_values: REFERENCE_MIN,
            max_values: REFERENCE_MAX,
            weights: REFERENCE_WEIGHTS,
        }
    }
}

impl NutrientConstraints {
    pub fn new(
        min_values: NutrientProfile,
        max_values: NutrientProfile,
        weights: NutrientProfile,
    ) -> Self {
        Self {
            min_values,
            max_values,
            weights,
        }
    }

    /// Whether `amount` lies inside the inclusive [min, max] window.
    #[inline]
    pub fn accepts(&self, nutrient: Nutrient, amount: f64) -> bool {
        amount >= self.min_values.get(nutrient) && amount <= self.max_values.get(nutrient)
    }
}
