use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DietError;
use crate::models::Menu;

/// Eating occasion within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(DietError::InvalidInput(format!("unknown meal type: {other}"))),
        }
    }
}

impl TryFrom<String> for MealType {
    type Error = DietError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MealType> for String {
    fn from(value: MealType) -> Self {
        value.as_str().to_string()
    }
}

/// One eating occasion: an ordered set of menu slots.
///
/// Menus are shared with the catalogue and with every other meal that
/// serves them.
#[derive(Debug, Clone)]
pub struct Meal {
    pub menus: Vec<Arc<Menu>>,
    pub day: String,
    pub meal_type: MealType,
}

impl Meal {
    pub fn new(menus: Vec<Arc<Menu>>, day: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            menus,
            day: day.into(),
            meal_type,
        }
    }

    /// Total ingredient cost of every menu in the meal.
    pub fn cost(&self) -> f64 {
        self.menus.iter().map(|m| m.cost()).sum()
    }

    /// Menu names in slot order.
    pub fn menu_names(&self) -> impl Iterator<Item = &str> {
        self.menus.iter().map(|m| m.name.as_str())
    }

    /// Same menu names in the same slots.
    pub fn same_menus(&self, other: &Meal) -> bool {
        self.menus.len() == other.menus.len()
            && self.menus.iter().zip(&other.menus).all(|(a, b)| a == b)
    }
}

/// A full meal plan, one genome in the population.
#[derive(Debug, Clone, Default)]
pub struct Diet {
    pub meals: Vec<Meal>,
}

impl Diet {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { meals }
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Total ingredient cost of the whole plan.
    pub fn total_cost(&self) -> f64 {
        self.meals.iter().map(Meal::cost).sum()
    }

    /// Every menu mention across the plan, in meal then slot order.
    pub fn all_menus(&self) -> impl Iterator<Item = &Arc<Menu>> {
        self.meals.iter().flat_map(|meal| meal.menus.iter())
    }

    /// Whether both plans hold the same menus in the same slots.
    pub fn same_menus(&self, other: &Diet) -> bool {
        self.meals.len() == other.meals.len()
            && self
                .meals
                .iter()
                .zip(&other.meals)
                .all(|(a, b)| a.same_menus(b))
    }

    /// Whether both plans share meal count and per-meal slot counts.
    pub fn same_shape(&self, other: &Diet) -> bool {
        self.meals.len() == other.meals.len()
            && self
                .meals
                .iter()
                .zip(&other.meals)
                .all(|(a, b)| a.menus.len() == b.menus.len())
    }
}
