use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::MenuCatalogue;
use crate::error::{DietError, Result};
use crate::models::{Diet, Meal, MealType, Menu};

/// One meal as stored in plan files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(deserialize_with = "day_label")]
    pub day: String,
    pub meal_type: MealType,
    pub menus: Vec<String>,
}

/// Accept day labels written either as text or as numbers.
fn day_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(i64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(s) => s,
        Label::Number(n) => n.to_string(),
    })
}

impl MealRecord {
    pub fn from_meal(meal: &Meal) -> Self {
        Self {
            day: meal.day.clone(),
            meal_type: meal.meal_type,
            menus: meal.menu_names().map(str::to_string).collect(),
        }
    }
}

/// Load menus from a JSON array.
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> Result<Vec<Menu>> {
    let content = fs::read_to_string(path)?;
    let menus: Vec<Menu> = serde_json::from_str(&content)?;
    Ok(menus)
}

/// Load ingredient unit prices (per 100 g) from a CSV with
/// `Ingredient` and `Price` columns.
pub fn load_price_table<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>> {
    #[derive(Deserialize)]
    struct PriceRow {
        #[serde(rename = "Ingredient")]
        ingredient: String,
        #[serde(rename = "Price")]
        price: f64,
    }

    let mut rdr = csv::Reader::from_path(path)?;
    let mut prices = HashMap::new();
    for row in rdr.deserialize() {
        let row: PriceRow = row?;
        prices.insert(row.ingredient.trim().to_string(), row.price);
    }
    Ok(prices)
}

/// Price every ingredient from a per-100 g table. Unlisted ingredients
/// cost nothing.
pub fn apply_prices(menus: &mut [Menu], prices: &HashMap<String, f64>) {
    for ingredient in menus.iter_mut().flat_map(|m| m.ingredients.iter_mut()) {
        ingredient.price = prices
            .get(&ingredient.name)
            .map_or(0.0, |per_100g| per_100g / 100.0 * ingredient.amount_g);
    }
}

/// A menu name dropped while resolving a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMenu {
    pub day: String,
    pub meal_type: MealType,
    pub name: String,
    /// Closest catalogue name, if any is close enough.
    pub suggestion: Option<String>,
}

impl fmt::Display for SkippedMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown menu '{}' skipped (day {}, {})",
            self.name, self.day, self.meal_type
        )?;
        if let Some(close) = &self.suggestion {
            write!(f, ", did you mean '{}'?", close)?;
        }
        Ok(())
    }
}

/// A resolved plan plus the names that could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct LoadedPlan {
    pub diet: Diet,
    pub skipped: Vec<SkippedMenu>,
}

impl LoadedPlan {
    /// The plan, or an error naming the first unknown menu.
    pub fn into_strict(self) -> Result<Diet> {
        match self.skipped.into_iter().next() {
            Some(missing) => Err(DietError::MenuNotFound(missing.name)),
            None => Ok(self.diet),
        }
    }
}

/// Resolve meal records against the catalogue.
///
/// Unknown menu names are dropped from their meal and reported in
/// `skipped`.
pub fn resolve_plan(records: Vec<MealRecord>, catalogue: &MenuCatalogue) -> LoadedPlan {
    let mut skipped = Vec::new();
    let mut meals = Vec::with_capacity(records.len());

    for record in records {
        let mut menus = Vec::with_capacity(record.menus.len());
        for name in record.menus.iter().map(|name| name.trim()) {
            match catalogue.get(name) {
                Some(menu) => menus.push(menu.clone()),
                None => {
                    let suggestion = catalogue.suggest(name).map(str::to_string);
                    warn!(menu = name, suggestion = ?suggestion, "unknown menu skipped");
                    skipped.push(SkippedMenu {
                        day: record.day.clone(),
                        meal_type: record.meal_type,
                        name: name.to_string(),
                        suggestion,
                    });
                }
            }
        }
        meals.push(Meal::new(menus, record.day, record.meal_type));
    }

    LoadedPlan {
        diet: Diet::new(meals),
        skipped,
    }
}

/// Load a plan (seed or history) from a JSON array of meal records.
pub fn load_plan<P: AsRef<Path>>(path: P, catalogue: &MenuCatalogue) -> Result<LoadedPlan> {
    let content = fs::read_to_string(path)?;
    let records: Vec<MealRecord> = serde_json::from_str(&content)?;
    Ok(resolve_plan(records, catalogue))
}

/// Save a plan as a JSON array of meal records.
pub fn save_plan<P: AsRef<Path>>(path: P, diet: &Diet) -> Result<()> {
    let records: Vec<MealRecord> = diet.meals.iter().map(MealRecord::from_meal).collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, NutrientProfile};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalogue() -> MenuCatalogue {
        MenuCatalogue::new(vec![
            Menu::new("Rice", NutrientProfile::default(), vec![], "Grain"),
            Menu::new("Miso Soup", NutrientProfile::default(), vec![], "Soup"),
        ])
    }

    #[test]
    fn test_load_catalogue() {
        let json = r#"[
            {"name": "Rice", "category": "Grain",
             "nutrients": {"energy_kcal": 300, "carbohydrate_g": 65, "protein_g": 5, "fat_g": 1, "Ca_mg": 10},
             "ingredients": [{"name": "White rice", "amount_g": 90}]}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let menus = load_catalogue(file.path()).unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].nutrients.energy, 300.0);
        assert_eq!(menus[0].ingredients[0].amount_g, 90.0);
    }

    #[test]
    fn test_price_table_applied_per_100g() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Ingredient,Price\nWhite rice,500\nTofu,1200\n")
            .unwrap();
        let prices = load_price_table(file.path()).unwrap();
        assert_eq!(prices.len(), 2);

        let mut menus = vec![Menu::new(
            "Rice",
            NutrientProfile::default(),
            vec![
                Ingredient::new("White rice", 0.0, 90.0),
                Ingredient::new("Saffron", 99.0, 1.0),
            ],
            "Grain",
        )];
        apply_prices(&mut menus, &prices);
        assert!((menus[0].ingredients[0].price - 450.0).abs() < 1e-9);
        assert_eq!(menus[0].ingredients[1].price, 0.0);
    }

    #[test]
    fn test_load_plan_skips_unknown_and_accepts_numeric_day() {
        let json = r#"[
            {"day": 1, "meal_type": "breakfast", "menus": ["Rice", " Miso Soup", "Bagel"]},
            {"day": "1", "meal_type": "Lunch", "menus": ["Rice"]}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_plan(file.path(), &catalogue()).unwrap();
        let diet = &loaded.diet;
        assert_eq!(diet.len(), 2);
        assert_eq!(diet.meals[0].day, "1");
        assert_eq!(diet.meals[0].meal_type, MealType::Breakfast);
        let names: Vec<&str> = diet.meals[0].menu_names().collect();
        assert_eq!(names, vec!["Rice", "Miso Soup"]);

        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].name, "Bagel");
        assert_eq!(loaded.skipped[0].meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_skipped_menu_carries_suggestion() {
        let records = vec![MealRecord {
            day: "1".to_string(),
            meal_type: MealType::Lunch,
            menus: vec!["Rice".to_string(), "Rcie".to_string()],
        }];
        let loaded = resolve_plan(records, &catalogue());

        assert_eq!(loaded.diet.meals[0].menus.len(), 1);
        let skipped = &loaded.skipped[0];
        assert_eq!(skipped.suggestion.as_deref(), Some("Rice"));
        assert_eq!(
            skipped.to_string(),
            "unknown menu 'Rcie' skipped (day 1, Lunch), did you mean 'Rice'?"
        );
    }

    #[test]
    fn test_strict_rejects_unknown_menu() {
        let records = vec![MealRecord {
            day: "2".to_string(),
            meal_type: MealType::Dinner,
            menus: vec!["Bagel".to_string()],
        }];
        let err = resolve_plan(records, &catalogue()).into_strict();
        assert!(matches!(err, Err(DietError::MenuNotFound(name)) if name == "Bagel"));

        let clean = vec![MealRecord {
            day: "2".to_string(),
            meal_type: MealType::Dinner,
            menus: vec!["Rice".to_string()],
        }];
        assert_eq!(resolve_plan(clean, &catalogue()).into_strict().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload_plan() {
        let catalogue = catalogue();
        let diet = resolve_plan(
            vec![MealRecord {
                day: "3".to_string(),
                meal_type: MealType::Dinner,
                menus: vec!["Miso Soup".to_string(), "Rice".to_string()],
            }],
            &catalogue,
        )
        .diet;

        let out = NamedTempFile::new().unwrap();
        save_plan(out.path(), &diet).unwrap();
        let reloaded = load_plan(out.path(), &catalogue).unwrap().diet;
        assert!(reloaded.same_menus(&diet));
        assert_eq!(reloaded.meals[0].meal_type, MealType::Dinner);
    }
}
