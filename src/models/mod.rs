mod constraints;
mod diet;
mod menu;

pub use constraints::NutrientConstraints;
pub use diet::{Diet, Meal, MealType};
pub use menu::{Ingredient, Menu, Nutrient, NutrientProfile};
