use serde::{Deserialize, Serialize};

/// The five nutrients tracked per meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Energy,
    Carbohydrate,
    Protein,
    Fat,
    Calcium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Energy,
        Nutrient::Carbohydrate,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Calcium,
    ];
}

/// Quantity of each tracked nutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(rename = "energy_kcal", default)]
    pub energy: f64,

    #[serde(rename = "carbohydrate_g", default)]
    pub carbohydrate: f64,

    #[serde(rename = "protein_g", default)]
    pub protein: f64,

    #[serde(rename = "fat_g", default)]
    pub fat: f64,

    #[serde(rename = "Ca_mg", default)]
    pub calcium: f64,
}

impl NutrientProfile {
    pub fn new(energy: f64, carbohydrate: f64, protein: f64, fat: f64, calcium: f64) -> Self {
        Self {
            energy,
            carbohydrate,
            protein,
            fat,
            calcium,
        }
    }

    #[inline]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Energy => self.energy,
            Nutrient::Carbohydrate => self.carbohydrate,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Calcium => self.calcium,
        }
    }

    /// Element-wise sum, used to total a meal.
    pub fn add(&mut self, other: &NutrientProfile) {
        self.energy += other.energy;
        self.carbohydrate += other.carbohydrate;
        self.protein += other.protein;
        self.fat += other.fat;
        self.calcium += other.calcium;
    }
}

/// An ingredient as used by one menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    /// Price of the quantity used, not a unit price.
    #[serde(default)]
    pub price: f64,

    pub amount_g: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, price: f64, amount_g: f64) -> Self {
        Self {
            name: name.into(),
            price,
            amount_g,
        }
    }
}

/// A named dish. Identity is the name: two menus with the same name are
/// the same menu no matter where they were loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,

    #[serde(default)]
    pub nutrients: NutrientProfile,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default = "unknown_category")]
    pub category: String,
}

fn unknown_category() -> String {
    "Unknown".to_string()
}

impl Menu {
    pub fn new(
        name: impl Into<String>,
        nutrients: NutrientProfile,
        ingredients: Vec<Ingredient>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            nutrients,
            ingredients,
            category: category.into(),
        }
    }

    /// Sum of ingredient prices.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.ingredients.iter().map(|i| i.price).sum()
    }
}

impl PartialEq for Menu {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Menu {}

impl std::hash::Hash for Menu {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
