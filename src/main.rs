use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use diet_optimizer_rs::cli::{Cli, Command, DataArgs};
use diet_optimizer_rs::data::{
    MenuCatalogue, apply_prices, load_catalogue, load_plan, load_price_table, save_plan,
};
use diet_optimizer_rs::error::{DietError, Result};
use diet_optimizer_rs::interface::{
    confirm_overwrite, display_front, display_harmony_pairs, display_plan, display_top_menus,
    format_scores, write_front_csv, write_front_json,
};
use diet_optimizer_rs::models::{Diet, NutrientConstraints};
use diet_optimizer_rs::optimizer::{
    COST_WINDOW_MEALS, DietOptimizer, FitnessEvaluator, OptimizerConfig, TOP_MENU_COUNT,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Optimize {
            data,
            plan,
            config,
            generations,
            population,
            seed,
            csv,
            json,
            save,
            yes,
        } => {
            let mut settings = match config {
                Some(path) => OptimizerConfig::load(path)?,
                None => OptimizerConfig::default(),
            };
            if let Some(g) = generations {
                settings.generations = g;
            }
            if let Some(p) = population {
                settings.population_size = p;
            }
            let outputs = Outputs {
                csv,
                json,
                save,
                yes,
            };
            cmd_optimize(&data, &plan, settings, seed, &outputs)
        }
        Command::Score { data, plan } => cmd_score(&data, &plan),
        Command::Harmony { data, top } => cmd_harmony(&data, top),
    }
}

/// Load the priced catalogue and the historical plan.
fn load_data(data: &DataArgs) -> Result<(MenuCatalogue, Diet)> {
    let mut menus = load_catalogue(&data.menus)?;
    if let Some(prices) = &data.prices {
        apply_prices(&mut menus, &load_price_table(prices)?);
    }

    let catalogue = MenuCatalogue::new(menus);
    if catalogue.is_empty() {
        return Err(DietError::EmptyCatalogue);
    }
    println!("Loaded {} menus", catalogue.len());

    let history = read_plan(&data.history, &catalogue, data.strict)?;
    println!("Loaded {} historical meals", history.len());

    Ok((catalogue, history))
}

/// Load a plan file, reporting unknown menu names on stderr.
fn read_plan(path: &Path, catalogue: &MenuCatalogue, strict: bool) -> Result<Diet> {
    let loaded = load_plan(path, catalogue)?;
    for skipped in &loaded.skipped {
        eprintln!("Warning: {}: {}", path.display(), skipped);
    }
    if strict {
        loaded.into_strict()
    } else {
        Ok(loaded.diet)
    }
}

fn load_seed(path: &Path, catalogue: &MenuCatalogue, strict: bool) -> Result<Diet> {
    let seed = read_plan(path, catalogue, strict)?;
    if seed.is_empty() {
        return Err(DietError::InvalidInput(format!(
            "plan {} has no meals",
            path.display()
        )));
    }
    Ok(seed)
}

/// Files an optimize run may write.
struct Outputs {
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    save: Option<PathBuf>,
    yes: bool,
}

impl Outputs {
    fn may_write(&self, path: &Path) -> Result<bool> {
        Ok(self.yes || confirm_overwrite(path)?)
    }
}

/// Run the search and report the final front.
fn cmd_optimize(
    data: &DataArgs,
    plan: &Path,
    config: OptimizerConfig,
    seed: u64,
    outputs: &Outputs,
) -> Result<()> {
    let (catalogue, history) = load_data(data)?;
    let initial = load_seed(plan, &catalogue, data.strict)?;
    display_plan(&initial, "Seed Plan");

    let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
    let optimizer = DietOptimizer::new(catalogue.menus().to_vec(), evaluator, config)?;

    println!(
        "Running up to {} generations with population {} over {} menus (seed {})...",
        optimizer.config().generations,
        optimizer.config().population_size,
        optimizer.catalogue().len(),
        seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let result = optimizer.optimize(&initial, &mut rng);

    display_front(&result, &initial, &optimizer.config().termination);

    if let Some(path) = &outputs.csv {
        if outputs.may_write(path)? {
            write_front_csv(&result, &initial, path)?;
            println!("Front written to {}", path.display());
        }
    }
    if let Some(path) = &outputs.json {
        if outputs.may_write(path)? {
            write_front_json(&result, path)?;
            println!("Front written to {}", path.display());
        }
    }
    if let (Some(path), Some(best)) = (&outputs.save, result.front.first()) {
        if outputs.may_write(path)? {
            save_plan(path, &best.diet)?;
            println!("Plan saved to {}", path.display());
        }
    }

    Ok(())
}

/// Print the objective scores of one plan.
fn cmd_score(data: &DataArgs, plan: &Path) -> Result<()> {
    let (catalogue, history) = load_data(data)?;
    let diet = load_seed(plan, &catalogue, data.strict)?;

    let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
    display_plan(&diet, "Plan");
    println!("Scores: {}", format_scores(&evaluator.evaluate(&diet)));
    Ok(())
}

/// Print the reference data the scores are measured against: cost
/// bounds, the most frequent menus and the strongest pairs.
fn cmd_harmony(data: &DataArgs, top: usize) -> Result<()> {
    let (_, history) = load_data(data)?;
    let evaluator = FitnessEvaluator::new(NutrientConstraints::default(), &history);
    let bounds = evaluator.cost_bounds();
    let harmony = evaluator.harmony();

    println!(
        "Cost bounds over {} meals: {:.2}..={:.2}",
        COST_WINDOW_MEALS, bounds.min_cost, bounds.max_cost
    );
    println!(
        "{} menus in history, pair counts {}..={}",
        harmony.len(),
        harmony.min(),
        harmony.max()
    );
    display_top_menus(&harmony.top_menus(TOP_MENU_COUNT));
    display_harmony_pairs(&harmony.top_pairs(top));
    Ok(())
}
