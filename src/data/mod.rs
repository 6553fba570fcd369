mod catalogue;
mod persistence;

pub use catalogue::MenuCatalogue;
pub use persistence::{
    LoadedPlan, MealRecord, SkippedMenu, apply_prices, load_catalogue, load_plan,
    load_price_table, resolve_plan, save_plan,
};
