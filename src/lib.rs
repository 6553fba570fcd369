pub mod cli;
pub mod data;
pub mod error;
pub mod interface;
pub mod models;
pub mod optimizer;

pub use error::{DietError, Result};
pub use models::{Diet, Meal, MealType, Menu};
